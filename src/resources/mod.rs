use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow, bail};
use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

use crate::{
    data_structures::{
        instance::normal_matrix,
        model::{self, ModelVertex},
        primitives,
        texture::Texture,
    },
    resources::texture::{
        TextureData, TextureKind, clean_path, diffuse_layout, load_binary, load_string,
        load_texture_data,
    },
};

/**
 * This module contains all logic for loading meshes and textures from external files.
 */
pub mod mesh;
pub mod texture;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Load a model, picking the loader from the file extension (`.obj`, `.gltf`, `.glb`).
pub async fn load_model(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let model = match extension.as_deref() {
        Some("obj") => load_model_obj(path, device, queue).await,
        Some("gltf") | Some("glb") => load_model_gltf(path, device, queue).await,
        _ => Err(anyhow!("Unsupported model format")),
    }
    .with_context(|| format!("Failed to load model {}", path.display()))?;
    log::info!(
        "loaded {} ({} meshes, {} materials)",
        path.display(),
        model.meshes.len(),
        model.materials.len()
    );
    Ok(model)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn upload_material(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    name: &str,
    data: TextureData,
) -> anyhow::Result<model::Material> {
    let texture = Texture::from_data(device, queue, data, Some(name))?;
    Ok(model::Material::new(device, name, texture, layout))
}

fn solid_colour(rgb: [f32; 3]) -> TextureData {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    TextureData::solid([r, g, b, 255])
}

pub async fn load_model_obj(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let path = clean_path(path);
    let directory = parent_dir(&path);
    let obj_text = load_string(&path).await?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = directory.join(clean_path(&p));
            async move {
                match load_string(&mtl_path).await {
                    Ok(text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(text))),
                    Err(e) => {
                        log::warn!("{e:#}");
                        Err(tobj::LoadError::OpenFileFailed)
                    }
                }
            }
        },
    )
    .await?;

    let obj_materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("Materials of {} could not be loaded: {}", path.display(), e);
        Vec::new()
    });

    // Decode every referenced texture concurrently; a texture that fails to decode is fatal.
    let textures = futures::future::try_join_all(obj_materials.iter().map(|m| {
        let texture_path = m.diffuse_texture.as_ref().map(|t| directory.join(clean_path(t)));
        async move {
            match texture_path {
                Some(texture_path) => load_texture_data(&texture_path, TextureKind::Diffuse)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        }
    }))
    .await?;

    let layout = diffuse_layout(device);
    let mut materials = Vec::with_capacity(obj_materials.len() + 1);
    for (m, texture) in obj_materials.iter().zip(textures) {
        let data = texture.unwrap_or_else(|| {
            log::warn!(
                "Material {} in {} references no diffuse texture, using its diffuse colour",
                m.name,
                path.display()
            );
            solid_colour(m.diffuse.unwrap_or([1.0; 3]))
        });
        materials.push(upload_material(device, queue, &layout, &m.name, data)?);
    }
    let default_material = materials.len();
    materials.push(upload_material(
        device,
        queue,
        &layout,
        "default",
        TextureData::solid(WHITE),
    )?);

    let file_name = path.to_string_lossy();
    let meshes = mesh::load_meshes(&models, &file_name, default_material, device);
    if meshes.is_empty() {
        bail!("{} contains no drawable meshes", path.display());
    }

    Ok(model::Model { meshes, materials })
}

/// Load the static geometry of a glTF file. The node hierarchy is flattened:
/// node transforms are baked into the vertices and animations are ignored.
pub async fn load_model_gltf(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let path = clean_path(path);
    let directory = parent_dir(&path);
    let gltf = gltf::Gltf::from_slice(&load_binary(&path).await?)?;

    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| anyhow!("Binary chunk missing"))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    bail!("Embedded data URIs are not supported");
                }
                buffer_data.push(load_binary(&directory.join(clean_path(uri))).await?);
            }
        }
    }

    let layout = diffuse_layout(device);
    let mut materials = Vec::new();
    for material in gltf.materials() {
        let name = material.name().unwrap_or("gltf material").to_string();
        let pbr = material.pbr_metallic_roughness();
        let data = match pbr.base_color_texture().map(|t| t.texture().source().source()) {
            Some(gltf::image::Source::View { view, .. }) => {
                let start = view.offset();
                let bytes = buffer_data[view.buffer().index()]
                    .get(start..start + view.length())
                    .ok_or_else(|| anyhow!("Image view of {name} is out of bounds"))?;
                TextureData::from_bytes(bytes, path.clone(), TextureKind::Diffuse)?
            }
            Some(gltf::image::Source::Uri { uri, .. }) => {
                load_texture_data(&directory.join(clean_path(uri)), TextureKind::Diffuse).await?
            }
            None => {
                let [r, g, b, _] = pbr.base_color_factor();
                solid_colour([r, g, b])
            }
        };
        materials.push(upload_material(device, queue, &layout, &name, data)?);
    }
    let default_material = materials.len();
    materials.push(upload_material(
        device,
        queue,
        &layout,
        "default",
        TextureData::solid(WHITE),
    )?);

    let mut meshes = Vec::new();
    let file_name = path.to_string_lossy();
    let mut stack: Vec<(gltf::Node, Matrix4<f32>)> = gltf
        .scenes()
        .flat_map(|scene| scene.nodes())
        .map(|node| (node, Matrix4::from_scale(1.0)))
        .collect();
    while let Some((node, parent)) = stack.pop() {
        let world = parent * Matrix4::from(node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            let normals = normal_matrix(&world);
            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    log::warn!("Skipping non-triangle primitive in {}", file_name);
                    continue;
                }
                let reader = primitive.reader(|buffer| Some(&buffer_data[buffer.index()]));
                let Some(positions) = reader.read_positions() else {
                    continue;
                };
                let mut vertices: Vec<ModelVertex> = positions
                    .map(|p| ModelVertex {
                        position: (world * Vector4::new(p[0], p[1], p[2], 1.0)).truncate().into(),
                        tex_coords: [0.0; 2],
                        normal: [0.0; 3],
                    })
                    .collect();
                if let Some(normal_attribute) = reader.read_normals() {
                    for (vertex, n) in vertices.iter_mut().zip(normal_attribute) {
                        let n = normals * Vector3::from(n);
                        vertex.normal = if n.magnitude2() > 0.0 { n.normalize() } else { n }.into();
                    }
                }
                if let Some(tex_coords) = reader.read_tex_coords(0) {
                    for (vertex, uv) in vertices.iter_mut().zip(tex_coords.into_f32()) {
                        vertex.tex_coords = uv;
                    }
                }
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(indices) => indices.into_u32().collect(),
                    None => (0..vertices.len() as u32).collect(),
                };
                let name = format!("{}:{}", file_name, mesh.name().unwrap_or("mesh"));
                let material = primitive.material().index().unwrap_or(default_material);
                meshes.extend(mesh::create_mesh(device, &name, &vertices, &indices, material));
            }
        }
        stack.extend(node.children().map(|child| (child, world)));
    }
    if meshes.is_empty() {
        bail!("{} contains no drawable meshes", path.display());
    }

    Ok(model::Model { meshes, materials })
}

/// Build one of the built-in cubes with the given texture.
pub fn load_cube_model(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    inverted: bool,
    texture: TextureData,
) -> anyhow::Result<model::Model> {
    let name = if inverted { "inverted cube" } else { "cube" };
    let layout = diffuse_layout(device);
    let material = upload_material(device, queue, &layout, name, texture)?;
    Ok(model::Model {
        meshes: cube_mesh(device, name, inverted).into_iter().collect(),
        materials: vec![material],
    })
}

/// Geometry of a built-in cube without any material.
pub fn cube_mesh(device: &wgpu::Device, name: &str, inverted: bool) -> Option<model::Mesh> {
    let (vertices, indices) = if inverted {
        primitives::inverted_cube()
    } else {
        primitives::cube()
    };
    mesh::create_mesh(device, name, &vertices, &indices, 0)
}
