use super::*;
use crate::scene::EntityState;

#[test]
fn test_created_entity_appears_next_tick() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let seen = record::<(u64, usize)>();

    let observed = seen.clone();
    let mut spawned = false;
    scheduler
        .commands()
        .create_entity(EntityConfig::new("spawner").with_script(from_fn(move |ctx| {
            if !spawned {
                ctx.commands().create_entity(
                    EntityConfig::new("floor")
                        .with_position(Vec3::new(-20.0, -2.0, 20.0))
                        .with_uniform_scale(10.0)
                        .with_mesh("floor"),
                )?;
                spawned = true;
            }
            let found = ctx.scene().find_by_name("floor").len();
            observed.borrow_mut().push((ctx.time().frame, found));
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    scheduler.run_tick();
    clock.advance(0.1);
    scheduler.run_tick();

    assert_eq!(*seen.borrow(), vec![(0, 0), (1, 1)]);

    let floor = scheduler.scene().find_by_name("floor")[0];
    let transform = scheduler.scene().global_transform(floor).unwrap();
    assert_eq!(transform.position, Vec3::new(-20.0, -2.0, 20.0));
    assert_eq!(transform.scale, Vec3::new(10.0, 10.0, 10.0));
}

#[test]
fn test_request_by_one_script_is_invisible_to_later_scripts_in_same_tick() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let seen = record::<(u64, usize)>();

    let mut fired = false;
    scheduler
        .commands()
        .create_entity(EntityConfig::new("a").with_script(from_fn(move |ctx| {
            if !fired {
                ctx.commands().create_entity(EntityConfig::new("marker"))?;
                fired = true;
            }
            Ok(())
        })))
        .unwrap();

    let observed = seen.clone();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("b").with_script(from_fn(move |ctx| {
            let count = ctx.scene().find_by_name("marker").len();
            observed.borrow_mut().push((ctx.time().frame, count));
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    scheduler.run_ticks(3);
    assert_eq!(*seen.borrow(), vec![(0, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_destroy_stays_visible_until_commit() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let seen = record::<(u64, usize)>();

    let target = scheduler
        .commands()
        .create_entity(EntityConfig::new("heh2").with_mesh("cow1"))
        .unwrap();

    let mut destroyed = false;
    scheduler
        .commands()
        .create_entity(EntityConfig::new("destroyer").with_script(from_fn(move |ctx| {
            if !destroyed {
                ctx.commands().destroy_entity(target);
                destroyed = true;
            }
            Ok(())
        })))
        .unwrap();

    let observed = seen.clone();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("watcher").with_script(from_fn(move |ctx| {
            let count = ctx.scene().find_by_name("heh2").len();
            observed.borrow_mut().push((ctx.time().frame, count));
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    let report = scheduler.run_tick();
    assert_eq!(report.commit.destroyed, vec![target]);
    scheduler.run_tick();

    assert_eq!(*seen.borrow(), vec![(0, 1), (1, 0)]);
    assert!(scheduler.scene().find_by_name("heh2").is_empty());
    assert!(matches!(
        scheduler.scene().name(target),
        Err(SceneError::InvalidEntity(_))
    ));
    assert!(matches!(
        scheduler
            .commands()
            .set_local_transform(target, Transform::identity()),
        Err(SceneError::InvalidEntity(_))
    ));

    // Destroying again is a no-op
    scheduler.commands().destroy_entity(target);
    assert!(scheduler.flush().is_empty());
}

#[test]
fn test_setup_commands_commit_with_first_tick_without_flush() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);

    let id = scheduler
        .commands()
        .create_entity(EntityConfig::new("late"))
        .unwrap();
    assert!(!scheduler.scene().contains(id));

    let report = scheduler.run_tick();
    assert_eq!(report.commit.created, vec![id]);
    assert!(scheduler.scene().contains(id));
}

#[test]
fn test_snapshot_reflects_committed_state() {
    let clock = ManualClock::new();
    let snapshots = record::<SceneSnapshot>();
    let mut scheduler =
        scheduler(&clock).with_renderer(RecordingRenderer(snapshots.clone()));

    let visible = scheduler
        .commands()
        .create_entity(EntityConfig::new("cow").with_mesh("cow1"))
        .unwrap();
    let hidden = scheduler
        .commands()
        .create_entity(EntityConfig::new("hidden").with_mesh("cow1"))
        .unwrap();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("empty"))
        .unwrap();
    scheduler.flush();

    let mut renderable = scheduler.scene().renderable(hidden).unwrap().unwrap().clone();
    renderable.set_visible(false);
    scheduler.scene_mut().attach_renderable(hidden, renderable).unwrap();
    scheduler.camera_mut().set_position(Vec3::new(0.0, 5.0, 10.0));

    let report = scheduler.run_tick();
    assert_eq!(report.rendered, 1);

    let snapshots = snapshots.borrow();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.camera.position, Vec3::new(0.0, 5.0, 10.0));

    let drawn: Vec<_> = snapshot.renderables().map(|(entity, _)| entity.id).collect();
    assert_eq!(drawn, vec![visible]);
}

#[test]
fn test_entity_state_follows_queued_requests() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let states = record::<(Option<EntityState>, Option<EntityState>)>();

    let target = scheduler
        .commands()
        .create_entity(EntityConfig::new("target"))
        .unwrap();
    assert_eq!(scheduler.scene().entity_state(target), Some(EntityState::Pending));

    let observed = states.clone();
    let mut requested = false;
    scheduler
        .commands()
        .create_entity(EntityConfig::new("watcher").with_script(from_fn(move |ctx| {
            if !requested {
                let mut commands = ctx.commands();
                let spawned = commands.create_entity(EntityConfig::new("spawned"))?;
                commands.destroy_entity(target);
                requested = true;
                let scene = ctx.scene();
                observed
                    .borrow_mut()
                    .push((scene.entity_state(spawned), scene.entity_state(target)));
            }
            Ok(())
        })))
        .unwrap();
    scheduler.flush();
    assert_eq!(scheduler.scene().entity_state(target), Some(EntityState::Committed));

    scheduler.run_tick();
    assert_eq!(
        *states.borrow(),
        vec![(Some(EntityState::Pending), Some(EntityState::PendingDestroy))]
    );
    assert_eq!(scheduler.scene().entity_state(target), Some(EntityState::Destroyed));
    let spawned = scheduler.scene().find_by_name("spawned")[0];
    assert_eq!(scheduler.scene().entity_state(spawned), Some(EntityState::Committed));

    // Setup requests are tracked the same way
    scheduler.commands().destroy_entity(spawned);
    assert_eq!(
        scheduler.scene().entity_state(spawned),
        Some(EntityState::PendingDestroy)
    );
    scheduler.flush();
    assert_eq!(scheduler.scene().entity_state(spawned), Some(EntityState::Destroyed));
}

#[test]
fn test_children_need_a_committed_parent() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);

    let mut commands = scheduler.commands();
    let parent = commands.create_entity(EntityConfig::new("parent")).unwrap();
    assert!(matches!(
        commands.create_child(parent, EntityConfig::new("child")),
        Err(SceneError::InvalidParent(id)) if id == parent
    ));
    assert!(matches!(
        commands.set_local_transform(parent, Transform::identity()),
        Err(SceneError::InvalidEntity(id)) if id == parent
    ));
    scheduler.flush();

    let child = scheduler
        .commands()
        .create_child(parent, EntityConfig::new("child"))
        .unwrap();
    scheduler.flush();
    assert_eq!(scheduler.scene().parent(child).unwrap(), Some(parent));
}
