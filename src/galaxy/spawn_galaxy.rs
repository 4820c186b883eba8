use super::galaxy_config::apply_parameter_changes;
use crate::graphics::{billboard_mesh, GalaxyPointsMaterial};
use crate::prelude::*;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

pub struct SpawnGalaxyPlugin;

impl Plugin for SpawnGalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyPoints>()
            .add_systems(
                Update,
                manage_galaxy_points.after(apply_parameter_changes),
            )
            .add_systems(Last, release_on_exit);
    }
}

/// The galaxy currently in the scene
#[derive(Resource, Default)]
pub struct GalaxyPoints(pub GalaxyResourceManager<GalaxyEntity>);

impl GalaxyPoints {
    pub fn attached_points(&self) -> usize {
        self.0
            .current()
            .map_or(0, |handle| handle.point_cloud().len())
    }
}

#[derive(Component)]
pub struct GalaxyPointsRoot;

/// Scene-side half of a galaxy handle
pub struct GalaxyEntity {
    entity: Entity,
    // empty clouds get no mesh
    assets: Option<(Handle<Mesh>, Handle<GalaxyPointsMaterial>)>,
}

impl GalaxyEntity {
    #[cfg(test)]
    pub fn entity(&self) -> Entity {
        self.entity
    }
}

/// Attaches point clouds as entities of the main world
pub struct SceneSink<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<GalaxyPointsMaterial>,
}

impl RenderSink for SceneSink<'_, '_, '_> {
    type Resource = GalaxyEntity;

    fn attach(&mut self, cloud: &PointCloud, config: &GalaxyConfig) -> GalaxyEntity {
        let assets = (!cloud.is_empty()).then(|| {
            (
                self.meshes.add(billboard_mesh(cloud)),
                self.materials.add(GalaxyPointsMaterial::new(config.size)),
            )
        });

        let mut entity = self.commands.spawn((
            GalaxyPointsRoot,
            Transform::IDENTITY,
            Visibility::Inherited,
        ));
        if let Some((mesh, material)) = &assets {
            entity.insert((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                NoFrustumCulling,
                NotShadowCaster,
            ));
        }

        GalaxyEntity {
            entity: entity.id(),
            assets,
        }
    }

    fn detach(&mut self, resource: GalaxyEntity) {
        debug!("Despawning galaxy points {:?}", resource.entity);
        self.commands.entity(resource.entity).despawn();
        if let Some((mesh, material)) = resource.assets {
            self.meshes.remove(&mesh);
            self.materials.remove(&material);
        }
    }
}

/// Rebuilds the galaxy whenever the config (or seed) changes, including the
/// first frame after start-up
fn manage_galaxy_points(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
    galaxy_config: Res<GalaxyConfig>,
    seed: Res<GalaxySeed>,
    mut galaxy_points: ResMut<GalaxyPoints>,
) {
    if !galaxy_config.is_changed() && !seed.is_changed() {
        return;
    }

    let mut sink = SceneSink {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    let mut rng = RngSource::from_seed_option(seed.0);

    match galaxy_points.0.regenerate(&mut sink, &galaxy_config, &mut rng) {
        Ok(()) => info!(
            "Galaxy config updated, generated {} points (generation {})",
            galaxy_config.count,
            galaxy_points.0.generation()
        ),
        Err(err) => error!("Galaxy regeneration rejected: {err}"),
    }
}

fn release_on_exit(
    mut exit: EventReader<AppExit>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
    mut galaxy_points: ResMut<GalaxyPoints>,
) {
    if exit.read().last().is_none() {
        return;
    }

    let mut sink = SceneSink {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    if galaxy_points.0.release(&mut sink) {
        info!("Released galaxy points on exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::GalaxyConfigPlugin;
    use bevy::asset::AssetPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<GalaxyPointsMaterial>()
            .add_plugins((GalaxyConfigPlugin, SpawnGalaxyPlugin))
            .insert_resource(GalaxySeed(Some(3)));
        app
    }

    fn root_count(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut query = world.query_filtered::<Entity, With<GalaxyPointsRoot>>();
        query.iter(world).count()
    }

    #[test]
    fn initial_galaxy_is_spawned_on_first_update() {
        let mut app = app();
        app.update();

        assert_eq!(root_count(&mut app), 1);
        let points = app.world().resource::<GalaxyPoints>();
        assert_eq!(points.attached_points(), GalaxyConfig::default().count as usize);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
    }

    #[test]
    fn committed_change_replaces_the_galaxy() {
        let mut app = app();
        app.update();
        let first = app
            .world()
            .resource::<GalaxyPoints>()
            .0
            .current()
            .map(|handle| handle.resource().entity())
            .unwrap();

        app.world_mut()
            .send_event(ParameterChanged(GalaxyParam::Count(300)));
        app.update();

        assert_eq!(root_count(&mut app), 1);
        assert!(app.world().get_entity(first).is_err());
        let points = app.world().resource::<GalaxyPoints>();
        assert_eq!(points.attached_points(), 300);
        assert_eq!(points.0.generation(), 2);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(
            app.world()
                .resource::<Assets<GalaxyPointsMaterial>>()
                .len(),
            1
        );
    }

    #[test]
    fn no_change_means_no_regeneration() {
        let mut app = app();
        app.update();
        app.update();
        app.update();
        assert_eq!(app.world().resource::<GalaxyPoints>().0.generation(), 1);
    }

    fn current_cloud(app: &App) -> PointCloud {
        app.world()
            .resource::<GalaxyPoints>()
            .0
            .current()
            .map(|handle| handle.point_cloud().clone())
            .unwrap()
    }

    #[test]
    fn forced_change_regenerates_with_fresh_draws() {
        let mut app = app();
        app.insert_resource(GalaxySeed(None));
        app.update();
        let first = current_cloud(&app);

        // what the Regenerate button does
        app.world_mut().resource_mut::<GalaxyConfig>().set_changed();
        app.update();

        let points = app.world().resource::<GalaxyPoints>();
        assert_eq!(points.0.generation(), 2);
        assert_eq!(points.attached_points(), first.len());
        assert_ne!(current_cloud(&app), first);
        assert_eq!(root_count(&mut app), 1);
    }

    #[test]
    fn seed_change_rebuilds_the_galaxy() {
        let mut app = app();
        app.update();
        let seeded = current_cloud(&app);

        app.insert_resource(GalaxySeed(Some(4)));
        app.update();
        assert_eq!(app.world().resource::<GalaxyPoints>().0.generation(), 2);
        assert_ne!(current_cloud(&app), seeded);

        app.insert_resource(GalaxySeed(Some(3)));
        app.update();
        assert_eq!(app.world().resource::<GalaxyPoints>().0.generation(), 3);
        assert_eq!(current_cloud(&app), seeded);
        assert_eq!(root_count(&mut app), 1);
    }

    #[test]
    fn empty_galaxy_spawns_without_mesh() {
        let mut app = app();
        app.insert_resource(GalaxyConfig {
            count: 0,
            ..default()
        });
        app.update();

        assert_eq!(root_count(&mut app), 1);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    }

    #[test]
    fn exit_releases_the_galaxy() {
        let mut app = app();
        app.update();
        app.world_mut().send_event(AppExit::Success);
        app.update();

        assert_eq!(root_count(&mut app), 0);
        assert!(app.world().resource::<GalaxyPoints>().0.current().is_none());
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    }
}
