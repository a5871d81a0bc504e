use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use flask_mix::equip::SlotBinding;
use flask_mix::{
    FlaskMixPlugin, FlaskMixSystems, Interactable, PhysicsBody, Wearable, WearableEquipped,
    WearableKind,
};

#[derive(Resource, Default)]
struct EquipLog(Vec<WearableEquipped>);

fn record_equips(mut equipped: MessageReader<WearableEquipped>, mut log: ResMut<EquipLog>) {
    log.0.extend(equipped.read().copied());
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, FlaskMixPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .init_resource::<EquipLog>()
        .add_systems(Update, record_equips.after(FlaskMixSystems::Equip));
    app.update();
    app
}

fn spawn_slot(app: &mut App, name: &str, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Name::new(name.to_string()), Transform::from_translation(position)))
        .id()
}

fn spawn_item(app: &mut App, kind: WearableKind, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Wearable::new(kind).with_max_distance(0.2),
            Interactable::default(),
            PhysicsBody::default(),
            Transform::from_translation(position),
        ))
        .id()
}

fn set_held(app: &mut App, item: Entity, held: bool) {
    app.world_mut().get_mut::<Interactable>(item).unwrap().selected = held;
}

fn move_to(app: &mut App, item: Entity, position: Vec3) {
    app.world_mut().get_mut::<Transform>(item).unwrap().translation = position;
}

fn wearable(app: &App, item: Entity) -> &Wearable {
    app.world().get::<Wearable>(item).unwrap()
}

fn run(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

#[test]
fn held_item_snaps_onto_slot_once() {
    let mut app = test_app();
    let slot = spawn_slot(&mut app, "Slot_Head", Vec3::new(0.0, 1.6, 0.0));
    let item = spawn_item(&mut app, WearableKind::Head, Vec3::new(0.0, 1.0, 0.0));
    app.update();
    assert_eq!(wearable(&app, item).slot(), SlotBinding::Bound(slot));

    set_held(&mut app, item, true);
    run(&mut app, 2);
    assert!(!wearable(&app, item).is_equipped());

    // Global positions trail local ones by a frame.
    move_to(&mut app, item, Vec3::new(0.0, 1.45, 0.0));
    run(&mut app, 2);

    assert!(wearable(&app, item).is_equipped());
    assert_eq!(app.world().get::<ChildOf>(item).map(|parent| parent.parent()), Some(slot));
    let transform = app.world().get::<Transform>(item).unwrap();
    assert_eq!(transform.translation, Vec3::ZERO);
    assert_eq!(transform.rotation, Quat::IDENTITY);
    assert!(!app.world().get::<Interactable>(item).unwrap().enabled);
    assert!(app.world().get::<PhysicsBody>(item).unwrap().kinematic);

    // Pulling it away afterwards does not unequip.
    move_to(&mut app, item, Vec3::new(5.0, 0.0, 0.0));
    run(&mut app, 4);
    assert!(wearable(&app, item).is_equipped());
    assert_eq!(app.world().get::<ChildOf>(item).map(|parent| parent.parent()), Some(slot));

    let log = &app.world().resource::<EquipLog>().0;
    assert_eq!(log.as_slice(), &[WearableEquipped { item, slot }]);
}

#[test]
fn item_not_held_is_never_equipped() {
    let mut app = test_app();
    spawn_slot(&mut app, "Slot_Chest", Vec3::new(0.0, 1.2, 0.0));
    let item = spawn_item(&mut app, WearableKind::Chest, Vec3::new(0.0, 1.25, 0.0));
    run(&mut app, 5);

    assert!(!wearable(&app, item).is_equipped());
    assert!(app.world().get::<ChildOf>(item).is_none());
    assert!(app.world().resource::<EquipLog>().0.is_empty());
}

#[test]
fn missing_slot_is_never_retried() {
    let mut app = test_app();
    let item = spawn_item(&mut app, WearableKind::Feet, Vec3::ZERO);
    app.update();
    assert_eq!(wearable(&app, item).slot(), SlotBinding::Missing);

    spawn_slot(&mut app, "Slot_Feet", Vec3::ZERO);
    set_held(&mut app, item, true);
    run(&mut app, 5);

    assert_eq!(wearable(&app, item).slot(), SlotBinding::Missing);
    assert!(!wearable(&app, item).is_equipped());
}

#[test]
fn slot_lookup_matches_item_kind() {
    let mut app = test_app();
    spawn_slot(&mut app, "Slot_Head", Vec3::ZERO);
    let hands = spawn_slot(&mut app, "Slot_Hands", Vec3::new(1.0, 0.0, 0.0));
    let item = spawn_item(&mut app, WearableKind::Hands, Vec3::new(3.0, 0.0, 0.0));
    app.update();

    assert_eq!(wearable(&app, item).slot(), SlotBinding::Bound(hands));
}
