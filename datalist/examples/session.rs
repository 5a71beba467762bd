//! Scripted session against an in-memory document.
//!
//! Types into a bound input, picks a row with the pointer and prints the
//! resulting document state. Widget internals are logged to session.log.

use std::fs::File;
use std::time::Duration;

use datadom::{Document, Element, Rect, Viewport};
use datalist::runtime::{channel, run};
use datalist::{DataListConfig, Event, Router, TokioClock};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::time::sleep;

const CONFIG: &str = r#"{ "filter_debounce_ms": 120, "blur_settle_ms": 100 }"#;

fn document() -> Document {
    let root = Element::box_()
        .id("form")
        .child(
            Element::input()
                .id("origin")
                .list("airports")
                .rect(Rect::new(40.0, 120.0, 320.0, 36.0)),
        )
        .child(
            Element::input()
                .id("origin-summary")
                .list("airports")
                .hidden(true),
        )
        .child(
            Element::data_list("airports")
                .child(Element::option("AMS").label("Amsterdam").content("Schiphol"))
                .child(Element::option("BER").label("Berlin").content("Brandenburg"))
                .child(Element::option("CDG").label("Paris").content("Charles de Gaulle"))
                .child(Element::option("LHR").label("London").content("Heathrow")),
        );
    Document::new(root, Viewport::new(1280.0, 900.0))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("session.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let config = DataListConfig::from_json(CONFIG)?;
    let mut doc = document();
    let mut router = Router::with_clock(config, TokioClock);
    let airports = router.mount(&mut doc, "airports");
    let (tx, rx) = channel(32);

    let script = async move {
        let steps = [
            Event::Click {
                target: "origin".into(),
            },
            Event::typed("origin", "a"),
            Event::typed("origin", "ar"),
            Event::typed("origin", "par"),
        ];
        for event in steps {
            if tx.send(event).await.is_err() {
                return;
            }
            sleep(Duration::from_millis(40)).await;
        }
        sleep(Duration::from_millis(200)).await;

        // Pointer-down lands before the input's focus loss settles
        let _ = tx
            .send(Event::FocusOut {
                target: "origin".into(),
            })
            .await;
        let _ = tx
            .send(Event::PanelPointerDown {
                instance: airports,
                row: Some(2),
            })
            .await;
        sleep(Duration::from_millis(150)).await;
        let _ = tx
            .send(Event::PanelClick {
                instance: airports,
                row: Some(2),
            })
            .await;
    };
    tokio::join!(run(&mut router, &mut doc, rx), script);

    if let Some(list) = router.instance(airports) {
        println!("panel: {:?}", list.visibility());
        println!("visible rows: {:?}", list.visible_values());
        if let Some(placement) = list.placement() {
            println!("placement: {:?}", placement.mode);
        }
    }
    for input in ["origin", "origin-summary"] {
        if let Some(element) = doc.get(input) {
            println!("{input} = {:?}", element.value);
        }
    }
    for notification in doc.notifications() {
        println!(
            "change on {} ({:?}): {:?}",
            notification.target, notification.origin, notification.value
        );
    }
    println!("focused: {:?}", doc.focused());
    Ok(())
}
