use super::*;
use crate::assets::TextureHandle;
use crate::foundation::math::sin;

#[test]
fn test_cooldown_spacing_across_ticks() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let fired = record::<u64>();

    let log = fired.clone();
    let mut cooldown = Cooldown::new(1.0);
    scheduler
        .commands()
        .create_entity(EntityConfig::new("timer").with_script(from_fn(move |ctx| {
            if cooldown.try_fire(ctx.elapsed()) {
                log.borrow_mut().push(ctx.time().frame);
            }
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    for now in [0.0, 0.5, 1.1, 2.2] {
        clock.set(now);
        scheduler.run_tick();
    }

    // Ticks 3 and 4 (frames 2 and 3) fire, tick 2 does not
    assert_eq!(*fired.borrow(), vec![2, 3]);
}

#[test]
fn test_texture_lookups_share_handles() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let handles = record::<TextureHandle>();

    let log = handles.clone();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("reader").with_script(from_fn(move |ctx| {
            let mut log = log.borrow_mut();
            log.push(ctx.texture("tex1.png")?);
            log.push(ctx.texture("tex1.png")?);
            log.push(ctx.texture("other.png")?);
            Ok(())
        })))
        .unwrap();
    scheduler.flush();
    scheduler.run_tick();

    let handles = handles.borrow();
    assert!(handles[0].ptr_eq(&handles[1]));
    assert!(!handles[0].ptr_eq(&handles[2]));
    assert_eq!(handles[0].name, "tex1.png");
    assert_eq!(handles[2].name, "other.png");

    // Later lookups still hand out the same instances
    let again = scheduler.resources().texture("tex1.png").unwrap();
    assert!(again.ptr_eq(&handles[0]));
    assert!(!again.ptr_eq(&handles[2]));
}

#[test]
fn test_second_script_is_rejected_and_first_stays() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let runs = record::<&'static str>();

    let id = scheduler
        .commands()
        .create_entity(EntityConfig::new("owner"))
        .unwrap();
    scheduler.flush();

    let first = runs.clone();
    scheduler
        .scene_mut()
        .attach_script(
            id,
            from_fn(move |_| {
                first.borrow_mut().push("s1");
                Ok(())
            })
            .named("s1"),
        )
        .unwrap();

    let second = runs.clone();
    let result = scheduler.scene_mut().attach_script(
        id,
        from_fn(move |_| {
            second.borrow_mut().push("s2");
            Ok(())
        }),
    );
    assert!(matches!(result, Err(SceneError::ScriptAlreadyAttached(owner)) if owner == id));
    assert_eq!(scheduler.scene().script_name(id).unwrap(), Some("s1"));

    scheduler.run_ticks(2);
    assert_eq!(*runs.borrow(), vec!["s1", "s1"]);
}

#[test]
fn test_key_press_edge_fires_once_while_held() {
    let clock = ManualClock::new();
    let held = InputSample::new().with_key(KeyCode::A);
    let input = ScriptedInput::new([
        InputSample::new(),
        held.clone(),
        held.clone(),
        held,
        InputSample::new(),
    ]);
    let mut scheduler = scheduler(&clock).with_input(input);
    let edges = record::<(bool, bool)>();

    let log = edges.clone();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("listener").with_script(from_fn(move |ctx| {
            let input = ctx.input();
            log.borrow_mut().push((
                input.was_key_pressed_this_frame(KeyCode::A),
                input.is_key_down(KeyCode::A),
            ));
            Ok(())
        })))
        .unwrap();
    scheduler.flush();
    scheduler.run_ticks(5);

    assert_eq!(
        *edges.borrow(),
        vec![
            (false, false),
            (true, true),
            (false, true),
            (false, true),
            (false, false),
        ]
    );
}

#[test]
fn test_failing_script_does_not_affect_others() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);

    let broken = scheduler
        .commands()
        .create_entity(EntityConfig::new("broken").with_script(from_fn(|ctx| {
            ctx.commands()
                .create_entity(EntityConfig::new("ghost").with_mesh("missing"))?;
            Ok(())
        })))
        .unwrap();
    scheduler
        .commands()
        .create_entity(EntityConfig::new("healthy").with_script(from_fn(|ctx| {
            ctx.commands()
                .create_entity(EntityConfig::new("heh2").with_mesh("cow1"))?;
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    let report = scheduler.run_tick();
    assert_eq!(report.scripts.updated, 2);
    assert_eq!(report.scripts.failures.len(), 1);
    assert_eq!(report.scripts.failures[0].entity, broken);
    assert!(matches!(
        report.scripts.failures[0].error,
        ScriptError::Scene(SceneError::Resource(_))
    ));
    assert_eq!(scheduler.scene().find_by_name("heh2").len(), 1);
    assert!(scheduler.scene().find_by_name("ghost").is_empty());

    scheduler.run_tick();
    assert_eq!(scheduler.scene().find_by_name("heh2").len(), 2);
    assert_eq!(scheduler.script_host().total_failures(), 2);
}

#[test]
fn test_camera_follows_script_writes() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);

    scheduler
        .commands()
        .create_entity(EntityConfig::new("camera rig").with_script(from_fn(|ctx| {
            let x = sin(ctx.elapsed());
            ctx.camera().set_position(Vec3::new(0.0, 0.0, 0.0));
            ctx.camera().set_position(Vec3::new(x, 0.0, 10.0));
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    clock.set(0.5);
    scheduler.run_tick();
    assert_eq!(scheduler.camera().position(), Vec3::new(sin(0.5), 0.0, 10.0));
    assert_eq!(scheduler.snapshot().camera.position, Vec3::new(sin(0.5), 0.0, 10.0));
}

#[test]
fn test_script_sees_its_owner() {
    struct Spinner {
        owner: Option<EntityId>,
        seen: Record<(EntityId, String)>,
    }

    impl Script for Spinner {
        fn update(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            let owner = self
                .owner
                .ok_or_else(|| ScriptError::custom("update before attach"))?;
            let name = ctx.owner_name()?.to_string();
            self.seen.borrow_mut().push((owner, name));

            let mut transform = ctx.owner_transform()?;
            transform.position.y += 1.0;
            ctx.set_owner_transform(transform)?;
            Ok(())
        }

        fn on_attach(&mut self, owner: EntityId) {
            self.owner = Some(owner);
        }
    }

    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let seen = record();

    let id = scheduler
        .commands()
        .create_entity(EntityConfig::new("spinner").with_script(Spinner {
            owner: None,
            seen: seen.clone(),
        }))
        .unwrap();
    scheduler.flush();
    scheduler.run_ticks(3);

    assert_eq!(*seen.borrow(), vec![(id, "spinner".to_string()); 3]);
    assert_eq!(
        scheduler.scene().local_transform(id).unwrap().position,
        Vec3::new(0.0, 3.0, 0.0)
    );
}

#[test]
fn test_script_can_destroy_its_owner() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(&clock);
    let deltas = record::<f32>();

    let log = deltas.clone();
    let id = scheduler
        .commands()
        .create_entity(EntityConfig::new("short lived").with_script(from_fn(move |ctx| {
            log.borrow_mut().push(ctx.delta());
            if ctx.elapsed() >= 1.0 {
                ctx.destroy_owner();
            }
            Ok(())
        })))
        .unwrap();
    scheduler.flush();

    scheduler.run_tick();
    clock.set(1.0);
    let report = scheduler.run_tick();
    assert_eq!(report.commit.destroyed, vec![id]);

    clock.set(1.5);
    let report = scheduler.run_tick();
    assert_eq!(report.scripts.updated, 0);
    assert_eq!(*deltas.borrow(), vec![0.0, 1.0]);
}
