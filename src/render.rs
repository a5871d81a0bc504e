use bevy::color::Srgba;
use bevy::prelude::*;

/// Current tint of an object's visible surface. Written only by the flask that
/// owns the entity (partner tints arrive as messages).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SurfaceColor(pub Srgba);

/// Mirror changed surface colors into their PBR material. Headless apps have
/// no material store, so this does nothing there.
pub fn sync_surface_materials(
    surfaces: Query<(&SurfaceColor, &MeshMaterial3d<StandardMaterial>), Changed<SurfaceColor>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let Some(mut materials) = materials else {
        return;
    };

    for (surface, material) in &surfaces {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = surface.0.into();
        }
    }
}
