//! Output vertex record handed to the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Floats per emitted record: 3 position + 3 normal.
pub const FLOATS_PER_VERTEX: usize = 6;

/// Position and smooth normal, laid out as six tightly packed `f32`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

/// View a vertex slice as the flat float buffer the renderer uploads.
pub fn as_floats(vertices: &[MeshVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_six_packed_floats() {
        assert_eq!(
            std::mem::size_of::<MeshVertex>(),
            FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );
        let v = [MeshVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0))];
        assert_eq!(as_floats(&v), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
