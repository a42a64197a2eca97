// src/models.rs
// Plain vertex data handed to the renderer. The Pod types can be cast straight into GPU buffers.
use bytemuck::{Pod, Zeroable};

// --- Instance Data for Circles (Nodes) ---
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub position: [f32; 2], // node centre, world units
    pub radius_scale: f32,  // node radius, world units
    pub color: [f32; 4],    // RGBA (linear)
}

// --- Vertex Data for Lines (Links) ---
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2], // world units
    pub color: [f32; 4],    // RGBA (linear)
}

// --- Text labels ---
// Not Pod: the renderer rasterizes `text` itself and caches the result.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelInstance {
    pub text: String,
    pub position: [f32; 2],
    /// Label height in world units; the width follows from the rasterized text.
    pub height: f32,
    /// RGBA (linear). Alpha 0 means hidden.
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 7 * 4);
        assert_eq!(std::mem::size_of::<LineVertex>(), 6 * 4);
    }

    #[test]
    fn instances_cast_to_bytes() {
        let circles = [CircleInstance {
            position: [1.0, 2.0],
            radius_scale: 0.5,
            color: [1.0; 4],
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&circles);
        assert_eq!(bytes.len(), 28);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats[2], 0.5);
    }
}
