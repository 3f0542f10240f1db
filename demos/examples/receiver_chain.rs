// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Receiver chains on two surfaces fed from a y-up platform.
//!
//! This example shows how to combine:
//! - `Surfaces` for per-surface input and button chains,
//! - `EventSource` for coordinate normalization and fault handling,
//! - typed receivers and closure-slot `Listener`s in one chain.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example receiver_chain`

use kurbo::{Point, Rect};
use understory_input_event::{
    CrossingEvent, EventKind, EventKinds, InputEvent, KeyCode, KeyEvent, PointerEvent,
};
use understory_receiver::fault::InputFault;
use understory_receiver::input::InputReceiver;
use understory_receiver::listener::{ButtonListener, Listener};
use understory_receiver::source::{CoordinateConvention, EventSource, FaultPolicy, SourceConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Surface {
    Canvas,
    Button,
}

/// Claims pointer-downs that land inside its bounds.
#[derive(Debug)]
struct HitArea {
    bounds: Rect,
}

impl InputReceiver<Surface> for HitArea {
    fn interests(&self) -> EventKinds {
        EventKinds::POINTER_DOWN | EventKinds::ENTER | EventKinds::EXIT
    }

    fn pointer_down(
        &mut self,
        surface: Surface,
        event: &PointerEvent<Surface>,
    ) -> Result<bool, InputFault> {
        let hit = self.bounds.contains(event.position);
        println!("  {surface:?}: hit area at {:?} -> {hit}", event.position);
        Ok(hit)
    }

    fn enter(&mut self, surface: Surface, _event: &CrossingEvent<Surface>) -> Result<(), InputFault> {
        println!("  {surface:?}: hover on");
        Ok(())
    }

    fn exit(&mut self, surface: Surface, _event: &CrossingEvent<Surface>) -> Result<(), InputFault> {
        println!("  {surface:?}: hover off");
        Ok(())
    }
}

fn main() {
    env_logger::init();

    // The platform reports y-up positions in a 300-unit-tall window.
    let config = SourceConfig::default()
        .with_convention(CoordinateConvention::FlipY { height: 300.0 })
        .with_fault_policy(FaultPolicy::Continue);
    let mut source = EventSource::new(config);

    let surfaces = source.surfaces_mut();
    surfaces.attach_input(
        Surface::Canvas,
        Listener::new().on_pointer_down(|surface, e| {
            println!("  {surface:?}: canvas logger saw {:?}", e.position);
            Ok(false)
        }),
    );
    surfaces.attach_input(
        Surface::Button,
        HitArea {
            bounds: Rect::new(0.0, 0.0, 100.0, 40.0),
        },
    );
    surfaces.attach_input(
        Surface::Button,
        Listener::new()
            .on_pointer_up(|surface, e| {
                println!(
                    "  {surface:?}: released (pressed on {:?})",
                    e.pressed_on
                );
                Ok(e.released_on_press_target())
            })
            .on_key_down(|_, e| {
                if e.key == KeyCode(27) {
                    Err(InputFault::rejected(EventKind::KeyDown, "escape is not bound"))
                } else {
                    Ok(true)
                }
            }),
    );
    surfaces.attach_button(
        Surface::Button,
        ButtonListener::new()
            .on_press_began(|s| {
                println!("  {s:?}: press began");
                Ok(())
            })
            .on_press_ended(|s| {
                println!("  {s:?}: press ended");
                Ok(())
            })
            .on_pressed(|s| {
                println!("  {s:?}: pressed!");
                Ok(())
            }),
    );

    let inside = Point::new(20.0, 280.0);
    let steps = [
        (
            "hover the button",
            InputEvent::Enter(CrossingEvent::new(Surface::Button, inside, 0)),
        ),
        (
            "press inside the button",
            InputEvent::PointerDown(PointerEvent::new(Surface::Button, inside, 0, 0)),
        ),
        (
            "release inside the button",
            InputEvent::PointerUp(PointerEvent::new(Surface::Button, inside, 0, 0)),
        ),
        (
            "press the button, release over the canvas",
            InputEvent::PointerDown(PointerEvent::new(Surface::Button, inside, 0, 0)),
        ),
        (
            "",
            InputEvent::PointerUp(PointerEvent::new(Surface::Canvas, inside, 0, 0)),
        ),
        (
            "press on the canvas",
            InputEvent::PointerDown(PointerEvent::new(Surface::Canvas, inside, 0, 0)),
        ),
        (
            "escape on the button",
            InputEvent::KeyDown(KeyEvent::new(Surface::Button, KeyCode(27))),
        ),
        (
            "leave the button",
            InputEvent::Exit(CrossingEvent::new(Surface::Button, inside, 0)),
        ),
    ];

    for (label, event) in steps {
        if !label.is_empty() {
            println!("{label}:");
        }
        let handled = source.feed(event);
        println!("  -> handled: {handled}");
    }

    println!("faults caught: {}", source.fault_count());
}
