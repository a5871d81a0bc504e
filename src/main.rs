use std::collections::HashSet;

use bevy::color::{Hsla, Srgba};
use bevy::prelude::*;
use flask_mix::config::CONTAINER_TAG;
use flask_mix::core::integrate_bodies;
use flask_mix::{
    ContainerConfig, ContainerContact, FlaskMixPlugin, FlaskMixSystems, Interactable,
    LiquidPrefab, LiquidProxy, PhysicsBody, PourMixController, SurfaceColor, Wearable,
    WearableKind,
};
use rand::Rng;

const FLASK_RADIUS: f32 = 0.3;
const FLASK_HEIGHT: f32 = 1.0;
const CONTACT_DISTANCE: f32 = FLASK_RADIUS * 2.0;
const TILT_SPEED: f32 = 90.0;
const MOVE_SPEED: f32 = 1.5;
const LIQUID_FLOOR: f32 = -5.0;

/// Stand-in for a physics engine's collision tag
#[derive(Component)]
struct SceneTag(&'static str);

/// The flask driven by the keyboard
#[derive(Component)]
struct Controlled;

fn spawn_flask(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    name: &'static str,
    position: Vec3,
    config: ContainerConfig,
) -> Entity {
    let flask = commands
        .spawn((
            Name::new(name),
            SceneTag(CONTAINER_TAG),
            Mesh3d(meshes.add(Cylinder::new(FLASK_RADIUS, FLASK_HEIGHT))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: config.initial_color.into(),
                ..default()
            })),
            SurfaceColor(config.initial_color),
            PhysicsBody {
                kinematic: true,
                ..default()
            },
            Transform::from_translation(position),
        ))
        .id();

    let anchor = commands
        .spawn((
            Name::new(format!("{name} spout")),
            Transform::from_xyz(0.0, FLASK_HEIGHT / 2.0, 0.0).looking_to(Vec3::X, Vec3::Y),
            ChildOf(flask),
        ))
        .id();

    commands
        .entity(flask)
        .insert(PourMixController::new(config).with_spawn_anchor(anchor));
    flask
}

fn init_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rand = rand::rng();

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.5, 6.0).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 6.0, 3.0),
    ));

    let liquid = LiquidPrefab {
        mass: 0.2,
        mesh: Some(meshes.add(Sphere::new(0.06))),
        material: Some(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.5, 1.0),
            ..default()
        })),
    };

    let green = Srgba::new(0.0, 1.0, 0.0, 1.0);
    let flask_a = spawn_flask(
        &mut commands,
        &mut meshes,
        &mut materials,
        "Flask A",
        Vec3::new(-1.5, 0.5, 0.0),
        ContainerConfig::default()
            .with_final_color(green)
            .with_liquid(Some(liquid.clone())),
    );
    commands.entity(flask_a).insert(Controlled);

    let partner_color = Srgba::from(Hsla::hsl(rand.random_range(0.0..360.0), 0.8, 0.5));
    spawn_flask(
        &mut commands,
        &mut meshes,
        &mut materials,
        "Flask B",
        Vec3::new(1.5, 0.5, 0.0),
        ContainerConfig::default()
            .with_final_color(partner_color)
            .with_liquid(Some(liquid)),
    );

    commands.spawn((
        Name::new(WearableKind::Head.slot_name()),
        Transform::from_xyz(0.0, 2.0, -1.0),
    ));
    commands.spawn((
        Name::new("Helmet"),
        Wearable::new(WearableKind::Head),
        Interactable::default(),
        PhysicsBody {
            kinematic: true,
            ..default()
        },
        Mesh3d(meshes.add(Sphere::new(0.15))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.8, 0.1))),
        Transform::from_xyz(0.0, 0.5, -1.0),
    ));
}

fn controls(
    input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut flask: Query<&mut Transform, (With<Controlled>, Without<Wearable>)>,
    mut helmet: Query<(&mut Transform, &mut Interactable), Without<Controlled>>,
) {
    let dt = time.delta_secs();

    if let Ok(mut transform) = flask.single_mut() {
        if input.pressed(KeyCode::KeyQ) {
            transform.rotate_z((TILT_SPEED * dt).to_radians());
        }
        if input.pressed(KeyCode::KeyE) {
            transform.rotate_z((-TILT_SPEED * dt).to_radians());
        }
        if input.pressed(KeyCode::ArrowLeft) {
            transform.translation.x -= MOVE_SPEED * dt;
        }
        if input.pressed(KeyCode::ArrowRight) {
            transform.translation.x += MOVE_SPEED * dt;
        }
    }

    for (mut transform, mut interactable) in &mut helmet {
        if input.just_pressed(KeyCode::Space) && interactable.enabled {
            interactable.selected = !interactable.selected;
        }
        if !interactable.selected {
            continue;
        }
        if input.pressed(KeyCode::KeyW) {
            transform.translation.y += MOVE_SPEED * dt;
        }
        if input.pressed(KeyCode::KeyS) {
            transform.translation.y -= MOVE_SPEED * dt;
        }
    }
}

/// Distance check standing in for collision detection. Reports each pair
/// once when they start touching, to both sides.
fn detect_flask_contacts(
    flasks: Query<(Entity, &GlobalTransform, &SceneTag), With<PourMixController>>,
    mut touching: Local<HashSet<(Entity, Entity)>>,
    mut contacts: MessageWriter<ContainerContact>,
) {
    let flasks: Vec<_> = flasks.iter().collect();
    for (i, (a, a_transform, a_tag)) in flasks.iter().enumerate() {
        for (b, b_transform, b_tag) in &flasks[i + 1..] {
            let pair = (*a, *b);
            let close =
                a_transform.translation().distance(b_transform.translation()) < CONTACT_DISTANCE;

            if !close {
                touching.remove(&pair);
                continue;
            }
            if !touching.insert(pair) {
                continue;
            }
            contacts.write(ContainerContact::new(*a, *b, b_tag.0));
            contacts.write(ContainerContact::new(*b, *a, a_tag.0));
        }
    }
}

fn cleanup_fallen_liquid(mut commands: Commands, liquid: Query<(Entity, &Transform), With<LiquidProxy>>) {
    for (entity, transform) in &liquid {
        if transform.translation.y < LIQUID_FLOOR {
            commands.entity(entity).despawn();
        }
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(FlaskMixPlugin)
        .add_systems(Startup, init_scene)
        .add_systems(
            Update,
            (controls, detect_flask_contacts)
                .chain()
                .before(FlaskMixSystems::Pour),
        )
        .add_systems(Update, (integrate_bodies, cleanup_fallen_liquid).chain())
        .run();
}
