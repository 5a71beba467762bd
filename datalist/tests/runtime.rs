use std::time::Duration;

use datadom::{Document, Element, Rect, Viewport};
use datalist::runtime::{channel, run};
use datalist::{DataListConfig, Event, Router, TokioClock, Visibility};
use tokio::time::sleep;

fn document() -> Document {
    let root = Element::box_()
        .id("root")
        .child(
            Element::input()
                .id("city")
                .list("cities")
                .rect(Rect::new(20.0, 100.0, 240.0, 32.0)),
        )
        .child(
            Element::data_list("cities")
                .child(Element::option("ber").content("Berlin"))
                .child(Element::option("rom").content("Rome")),
        );
    Document::new(root, Viewport::new(1024.0, 800.0))
}

#[tokio::test(start_paused = true)]
async fn test_debounced_filter_fires_in_loop() {
    let mut doc = document();
    let mut router = Router::with_clock(DataListConfig::default(), TokioClock);
    let id = router.mount(&mut doc, "cities");
    let (tx, rx) = channel(16);

    let script = async move {
        tx.send(Event::Click { target: "city".into() }).await.unwrap();
        tx.send(Event::typed("city", "r")).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        tx.send(Event::typed("city", "ro")).await.unwrap();
        sleep(Duration::from_millis(300)).await;
    };
    tokio::join!(run(&mut router, &mut doc, rx), script);

    let cities = router.instance(id).unwrap();
    assert_eq!(cities.visibility(), Visibility::Visible);
    assert_eq!(cities.visible_values(), vec!["rom"]);
    assert!(router.next_deadline().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_hides_in_loop() {
    let mut doc = document();
    let mut router = Router::with_clock(DataListConfig::default(), TokioClock);
    let id = router.mount(&mut doc, "cities");
    let (tx, rx) = channel(16);

    let script = async move {
        tx.send(Event::Click { target: "city".into() }).await.unwrap();
        tx.send(Event::FocusOut { target: "city".into() }).await.unwrap();
        sleep(Duration::from_millis(150)).await;
    };
    tokio::join!(run(&mut router, &mut doc, rx), script);

    assert_eq!(router.instance(id).unwrap().visibility(), Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_pending_timers_dropped_on_close() {
    let mut doc = document();
    let mut router = Router::with_clock(DataListConfig::default(), TokioClock);
    let id = router.mount(&mut doc, "cities");
    let (tx, rx) = channel(16);

    let script = async move {
        tx.send(Event::typed("city", "ber")).await.unwrap();
    };
    tokio::join!(run(&mut router, &mut doc, rx), script);

    // the loop stopped before the debounce came due
    assert_eq!(router.instance(id).unwrap().visibility(), Visibility::Hidden);
    assert!(router.next_deadline().is_some());
}
