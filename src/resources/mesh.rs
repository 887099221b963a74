use wgpu::util::DeviceExt;

use crate::data_structures::model;

/// Upload vertices and indices into a [`model::Mesh`]. Geometry without
/// vertices or indices yields `None`, since empty buffers cannot be bound.
pub fn create_mesh(
    device: &wgpu::Device,
    name: &str,
    vertices: &[model::ModelVertex],
    indices: &[u32],
    material: usize,
) -> Option<model::Mesh> {
    if vertices.is_empty() || indices.is_empty() {
        log::warn!("Mesh {} has no faces and is skipped", name);
        return None;
    }

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    Some(model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: indices.len() as u32,
        material,
    })
}

/// Convert tobj meshes into GPU meshes. Missing texture coordinates and
/// normals default to zero; empty meshes are dropped.
///
/// `default_material` is used for meshes that reference no material.
pub fn load_meshes(
    models: &[tobj::Model],
    file_name: &str,
    default_material: usize,
    device: &wgpu::Device,
) -> Vec<model::Mesh> {
    models
        .iter()
        .filter_map(|m| {
            let vertices = (0..m.mesh.positions.len() / 3)
                .map(|i| model::ModelVertex {
                    position: [
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ],
                    tex_coords: [
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ],
                    normal: [
                        m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                    ],
                })
                .collect::<Vec<_>>();

            let name = format!("{}:{}", file_name, m.name);
            // The indices address positions, texels and normals alike because `single_index` is set.
            create_mesh(
                device,
                &name,
                &vertices,
                &m.mesh.indices,
                m.mesh.material_id.unwrap_or(default_material),
            )
        })
        .collect()
}
