use bevy::input::touch::TouchPhase;
use bevy::prelude::*;
use bevy::window::WindowEvent;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(Update, collect_pointer_events);
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left, y down
    pub position: Vec2,
    pub event_type: PointerEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    /// Pointer arrived on screen
    Enter,
    Move,
    /// Pointer left the screen
    Leave,
}

/// Last known pointer position and whether it is on screen
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorPos {
    pub position: Option<Vec2>,
    pub on_screen: bool,
}

impl CursorPos {
    /// Record a move, announcing an enter first if the pointer was off screen.
    ///
    /// Winit does not report an enter when the cursor already sits in the
    /// window at startup, so the first move stands in for it.
    fn moved(&mut self, position: Vec2, out: &mut impl FnMut(PointerEvent)) {
        self.position = Some(position);
        if !self.on_screen {
            self.on_screen = true;
            out(PointerEvent {
                position,
                event_type: PointerEventType::Enter,
            });
        }
        out(PointerEvent {
            position,
            event_type: PointerEventType::Move,
        });
    }

    fn left(&mut self, out: &mut impl FnMut(PointerEvent)) {
        if !self.on_screen {
            return;
        }
        self.on_screen = false;
        out(PointerEvent {
            position: self.position.unwrap_or_default(),
            event_type: PointerEventType::Leave,
        });
    }
}

/// System: Translate window input into pointer events.
///
/// Reads the combined window event stream so enter/move/leave keep the
/// order the host reported them in, even within a single frame.
pub fn collect_pointer_events(
    mut window_events: MessageReader<WindowEvent>,
    mut cursor: ResMut<CursorPos>,
    mut out: MessageWriter<PointerEvent>,
) {
    let mut emit = |event: PointerEvent| {
        out.write(event);
    };

    for event in window_events.read() {
        match event {
            // Re-entry: the next move fires the enter with a real position
            WindowEvent::CursorEntered(_) => cursor.on_screen = false,
            WindowEvent::CursorMoved(e) => cursor.moved(e.position, &mut emit),
            WindowEvent::CursorLeft(_) => cursor.left(&mut emit),
            WindowEvent::TouchInput(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => cursor.moved(touch.position, &mut emit),
                TouchPhase::Ended | TouchPhase::Canceled => cursor.left(&mut emit),
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::touch::TouchInput;
    use bevy::window::{CursorEntered, CursorLeft, CursorMoved};

    #[test]
    fn test_first_move_announces_enter() {
        let mut cursor = CursorPos::default();
        let mut seen = Vec::new();
        let mut record = |e: PointerEvent| seen.push(e.event_type);

        cursor.moved(Vec2::new(1.0, 2.0), &mut record);
        cursor.moved(Vec2::new(3.0, 4.0), &mut record);

        assert_eq!(
            seen,
            vec![
                PointerEventType::Enter,
                PointerEventType::Move,
                PointerEventType::Move
            ]
        );
    }

    #[test]
    fn test_leave_then_return() {
        let mut cursor = CursorPos::default();
        let mut seen = Vec::new();
        let mut record = |e: PointerEvent| seen.push((e.event_type, e.position));

        cursor.moved(Vec2::new(1.0, 2.0), &mut record);
        cursor.left(&mut record);
        cursor.left(&mut record);
        cursor.moved(Vec2::new(5.0, 5.0), &mut record);

        let types: Vec<_> = seen.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![
                PointerEventType::Enter,
                PointerEventType::Move,
                PointerEventType::Leave,
                PointerEventType::Enter,
                PointerEventType::Move
            ]
        );
        assert_eq!(seen[2].1, Vec2::new(1.0, 2.0), "leave reports the last position");
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_message::<WindowEvent>()
            .init_resource::<CursorPos>()
            .init_resource::<SeenEvents>()
            .add_message::<PointerEvent>()
            .add_systems(Update, (collect_pointer_events, record_events).chain());
        app
    }

    #[derive(Resource, Default)]
    struct SeenEvents(Vec<PointerEvent>);

    fn record_events(mut events: MessageReader<PointerEvent>, mut seen: ResMut<SeenEvents>) {
        seen.0.extend(events.read().copied());
    }

    fn cursor_moved(x: f32, y: f32) -> WindowEvent {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        })
    }

    #[test]
    fn test_leave_and_return_within_one_frame() {
        let mut app = input_app();

        app.world_mut().write_message(cursor_moved(5.0, 5.0));
        app.update();
        app.world_mut().resource_mut::<SeenEvents>().0.clear();

        let window = Entity::PLACEHOLDER;
        let world = app.world_mut();
        world.write_message(WindowEvent::CursorLeft(CursorLeft { window }));
        world.write_message(WindowEvent::CursorEntered(CursorEntered { window }));
        world.write_message(cursor_moved(9.0, 9.0));
        app.update();

        let seen = &app.world().resource::<SeenEvents>().0;
        let types: Vec<_> = seen.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                PointerEventType::Leave,
                PointerEventType::Enter,
                PointerEventType::Move
            ]
        );
        assert_eq!(seen[2].position, Vec2::new(9.0, 9.0));
        assert!(app.world().resource::<CursorPos>().on_screen);
    }

    #[test]
    fn test_touch_end_leaves_screen() {
        let mut app = input_app();
        let touch = |phase, x: f32| {
            WindowEvent::TouchInput(TouchInput {
                phase,
                position: Vec2::new(x, 0.0),
                window: Entity::PLACEHOLDER,
                force: None,
                id: 0,
            })
        };

        app.world_mut().write_message(touch(TouchPhase::Started, 1.0));
        app.world_mut().write_message(touch(TouchPhase::Ended, 1.0));
        app.update();

        let seen = &app.world().resource::<SeenEvents>().0;
        let types: Vec<_> = seen.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                PointerEventType::Enter,
                PointerEventType::Move,
                PointerEventType::Leave
            ]
        );
        assert!(!app.world().resource::<CursorPos>().on_screen);
    }
}
