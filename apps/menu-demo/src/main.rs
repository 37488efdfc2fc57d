//! Drives a context menu through a scripted session in real time and prints
//! every published scene change. Run with `RUST_LOG=debug` to also see the
//! menu's own phase logging.

mod host;
mod session;

use std::rc::Rc;

use peekmenu::prelude::*;
use peekmenu::ContextMenuAction;
use peekmenu_core::Runtime;

use crate::host::DemoHost;
use crate::session::{Session, Step};

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Peekmenu Demo ===");
    println!("  1. long-press the child, tap \"Share\"");
    println!("  2. long-press again, drag the preview down to dismiss");
    println!("  3. open and close through the handle");
    println!();

    let config = match MenuConfig::builder()
        .actions([
            ContextMenuAction::new("Copy")
                .icon("doc.on.doc")
                .default_action()
                .on_pressed(|| println!("-> Copy pressed")),
            ContextMenuAction::new("Share")
                .icon("square.and.arrow.up")
                .on_pressed(|| println!("-> Share pressed")),
            ContextMenuAction::new("Delete")
                .icon("trash")
                .destructive()
                .on_pressed(|| println!("-> Delete pressed")),
        ])
        .enable_haptic_feedback(true)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid menu config: {err}");
            return;
        }
    };

    let runtime = Runtime::new();
    let host = Rc::new(DemoHost::new());
    let menu = match ContextMenu::new(config, host.clone(), runtime.handle()) {
        Ok(menu) => menu,
        Err(err) => {
            log::error!("failed to create menu: {err}");
            return;
        }
    };
    let _open_log = menu.open_state().subscribe(|open| {
        println!("-> menu is {}", if *open { "open" } else { "closed" });
    });

    let child = host.child_center();
    let script = [
        Step::Down(child),
        Step::Wait(1_300),
        Step::Up(child),
        Step::TapAction(1),
        Step::Wait(600),
        Step::Down(child),
        Step::Wait(1_300),
        Step::Up(child),
        Step::DragPreview { dy: 80.0, steps: 4 },
        Step::Wait(120),
        Step::Release,
        Step::Wait(600),
        Step::Open,
        Step::Wait(600),
        Step::Close,
        Step::Wait(600),
    ];

    let mut session = Session::new(&runtime, &menu);
    for step in script {
        session.run(step);
    }
    println!();
    println!(
        "done after {} frames, {} haptic pulses",
        session.frames(),
        host.haptic_count()
    );
}
