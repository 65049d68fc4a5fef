use bevy::prelude::*;

use crate::{
    input::{PointerEvent, PointerEventType},
    trailer::{AnimationQueue, Approach, Target, TrailerController},
    visual::{
        followers::{FollowerAnimation, FollowerVisual},
        regions::{HoverRegion, RegionAnimation},
    },
};

/// System: Route pointer events through the controller.
///
/// Region handlers run before the screen handler for the same move, and
/// region leaves run before region enters, so the hovering flag is settled
/// by the time free-roam tracking looks at it.
pub fn dispatch_pointer_events(
    mut pointer_events: MessageReader<PointerEvent>,
    mut controller: ResMut<TrailerController>,
    mut queue: ResMut<AnimationQueue>,
    mut regions: Query<(&mut HoverRegion, &RegionAnimation)>,
) {
    for event in pointer_events.read() {
        match event.event_type {
            PointerEventType::Enter => {
                debug!("Pointer entered screen at {}", event.position);
                controller.on_pointer_enter_screen(event.position, &mut queue);
            }

            PointerEventType::Move => {
                route_region_move(event.position, &mut controller, &mut queue, &mut regions);
                controller.on_pointer_move_screen(event.position, &mut queue);
            }

            PointerEventType::Leave => {
                // Leaving the window also leaves whatever region was under it
                for (mut region, animation) in regions.iter_mut() {
                    if region.pointer_inside {
                        let snapshot = region.snapshot(animation);
                        region.pointer_inside = false;
                        controller.on_hover_leave(&snapshot, &mut region.session, &mut queue);
                    }
                }
                debug!("Pointer left screen");
                controller.on_pointer_leave_screen(&mut queue);
            }
        }
    }
}

fn route_region_move(
    pointer: Vec2,
    controller: &mut TrailerController,
    queue: &mut AnimationQueue,
    regions: &mut Query<(&mut HoverRegion, &RegionAnimation)>,
) {
    for (mut region, animation) in regions.iter_mut() {
        let snapshot = region.snapshot(animation);
        if region.pointer_inside && !snapshot.bounds.contains(pointer) {
            region.pointer_inside = false;
            controller.on_hover_leave(&snapshot, &mut region.session, queue);
            debug!("Left {}", snapshot.id);
        }
    }

    for (mut region, animation) in regions.iter_mut() {
        let snapshot = region.snapshot(animation);
        if !snapshot.bounds.contains(pointer) {
            continue;
        }

        if !region.pointer_inside {
            region.pointer_inside = true;
            controller.on_hover_enter(&snapshot, &mut region.session, queue);
            debug!("Entered {}", snapshot.id);
        }

        let approach = controller.on_hover_move(pointer, &snapshot, &mut region.session, queue);
        if approach == Approach::Leaving {
            trace!("{} pulled toward {}", snapshot.id, pointer);
        }
    }
}

/// System: Hand queued animation commands to their target entities
pub fn apply_animation_commands(
    mut queue: ResMut<AnimationQueue>,
    mut followers: Query<(&FollowerVisual, &mut FollowerAnimation)>,
    mut regions: Query<(&HoverRegion, &mut RegionAnimation)>,
) {
    for command in queue.drain() {
        match command.target {
            Target::Follower(role) => {
                for (visual, mut animation) in &mut followers {
                    if visual.role == role {
                        animation.apply(command.property, command.transition);
                    }
                }
            }
            Target::Region(id) => {
                for (region, mut animation) in &mut regions {
                    if region.id == id {
                        animation.apply(command.property, command.transition);
                    }
                }
            }
        }
    }
}
