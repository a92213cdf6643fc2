//! # Vertex Data Structures
//!
//! GPU-compatible vertex formats for fragment geometry. Renderers can
//! upload these buffers directly; the `#[repr(C)]` layout and
//! `bytemuck` traits make the cast safe.

/// A fragment vertex with position, normal, and texture coordinates.
///
/// Fragments cut from sources without normals or UVs fill the missing
/// attributes with zeros so the layout stays fixed.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FragmentVertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub uv: [f32; 2],
}
