//! Scripts driving the sample scene

use scene_runtime::assets::MeshHandle;
use scene_runtime::foundation::math::sin;
use scene_runtime::prelude::*;

/// Spawns a cow every second and removes the oldest one every two seconds
///
/// The toggle key pauses and resumes both. The camera sways along X with the
/// elapsed time while looking at the origin.
pub struct CowSpawner {
    spawn: Cooldown,
    despawn: Cooldown,
    enabled: bool,
    toggle_key: KeyCode,
    camera_anchor: Vec3,
}

impl CowSpawner {
    /// Spawner toggled with `toggle_key`
    pub fn new(toggle_key: KeyCode) -> Self {
        Self {
            spawn: Cooldown::new(1.0),
            despawn: Cooldown::starting_at(2.0, 1.0),
            enabled: true,
            toggle_key,
            camera_anchor: Vec3::zeros(),
        }
    }

    /// Builder pattern: point the camera sway is centred on
    pub fn with_camera_anchor(mut self, anchor: Vec3) -> Self {
        self.camera_anchor = anchor;
        self
    }
}

impl Script for CowSpawner {
    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        let now = ctx.elapsed();
        let sway = Vec3::new(sin(now), 0.0, 0.0);
        let camera = ctx.camera();
        camera.set_position(self.camera_anchor + sway);
        camera.look_at(Vec3::zeros(), Vec3::y());

        if ctx.input().was_key_pressed_this_frame(self.toggle_key) {
            self.enabled = !self.enabled;
            log::info!(
                "Spawner {} at {:.2}s",
                if self.enabled { "resumed" } else { "paused" },
                now
            );
        }
        if !self.enabled {
            return Ok(());
        }

        if self.spawn.try_fire(now) {
            let id = ctx.commands().create_entity(
                EntityConfig::new("heh2")
                    .with_position(Vec3::new(now, sin(now), 5.0))
                    .with_mesh("cow1")
                    .with_texture("tex1.png"),
            )?;
            log::info!("Creating new cow {}", id);
        }

        if self.despawn.try_fire(now) {
            if let Some(&oldest) = ctx.scene().find_by_name("heh2").first() {
                log::info!("Destroying cow {}", oldest);
                ctx.commands().destroy_entity(oldest);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "cow_spawner"
    }
}

/// Grows a column of children under its owner and prunes entities named
/// "heh" every two seconds
///
/// Children get the monkey mesh on the tick after they appear.
///
/// Holding the rename key renames the owner to "heh" once, after which the
/// next prune removes the owner together with its children.
pub struct Nester {
    mesh: Option<MeshHandle>,
    renamed: bool,
    rename_key: KeyCode,
    grow: Cooldown,
    prune: Cooldown,
}

impl Nester {
    /// Nester renaming its owner while `rename_key` is held
    pub fn new(rename_key: KeyCode) -> Self {
        Self {
            mesh: None,
            renamed: false,
            rename_key,
            grow: Cooldown::new(2.0),
            prune: Cooldown::starting_at(2.0, 1.0),
        }
    }
}

impl Script for Nester {
    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        let mesh = match &self.mesh {
            Some(mesh) => mesh.clone(),
            None => {
                let mesh = ctx.mesh("monkey")?;
                self.mesh = Some(mesh.clone());
                mesh
            }
        };

        let owner = ctx.entity();
        let now = ctx.elapsed();

        if !self.renamed && ctx.input().is_key_down(self.rename_key) {
            ctx.commands().set_name(owner, "heh")?;
            self.renamed = true;
        }

        let scene = ctx.scene();
        let bare: Vec<EntityId> = scene
            .children(owner)?
            .iter()
            .copied()
            .filter(|child| matches!(scene.renderable(*child), Ok(None)))
            .collect();
        for child in bare {
            ctx.commands()
                .attach_renderable(child, RenderableComponent::new(mesh.clone()))?;
        }

        if self.grow.try_fire(now) {
            ctx.commands().create_child(
                owner,
                EntityConfig::new("heh2").with_position(Vec3::new(0.0, now, 0.0)),
            )?;
        }

        if self.prune.try_fire(now) {
            if let Some(&target) = ctx.scene().find_by_name("heh").first() {
                log::info!("Destroying {} and its children", target);
                ctx.commands().destroy_entity(target);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "nester"
    }
}
