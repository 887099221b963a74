#![cfg(feature = "integration-tests")]

use std::time::Duration;

use cgmath::{Matrix4, Vector3};
use rt_render::{
    context::request_device,
    data_structures::object::SceneObject,
    pipelines::shadow_depth::DepthCubemapRenderer,
    resources::{load_cube_model, texture::TextureData},
    shadow::ShadowTransforms,
};

const RESOLUTION: u32 = 64;
const NEAR: f32 = 0.1;
const FAR: f32 = 25.0;

struct Faces(Vec<f32>);

impl Faces {
    fn depth(&self, face: usize, row: u32, col: u32) -> f32 {
        let index = (face as u32 * RESOLUTION + row) * RESOLUTION + col;
        self.0[index as usize]
    }
}

/// Render the depth pass for a light at the origin inside a room of half-size 5
/// plus `blockers`, and read all six faces back.
async fn render_faces(blockers: &[Matrix4<f32>]) -> Faces {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let (_, device, queue) = request_device(&instance, None)
        .await
        .expect("no graphics device available");
    let renderer = DepthCubemapRenderer::new(&device, RESOLUTION);

    let mut objects = vec![SceneObject::new(
        &device,
        load_cube_model(&device, &queue, true, TextureData::solid([255; 4])).unwrap(),
        Matrix4::from_scale(5.0),
    )];
    for blocker in blockers {
        let model = load_cube_model(&device, &queue, false, TextureData::solid([255; 4])).unwrap();
        objects.push(SceneObject::new(&device, model, *blocker));
    }

    let light = Vector3::new(0.0, 0.0, 0.0);
    let transforms = ShadowTransforms::new(light, NEAR, FAR);
    let bytes_per_face = (RESOLUTION * RESOLUTION * 4) as wgpu::BufferAddress;
    let output = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Depth Readback Buffer"),
        size: bytes_per_face * 6,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Depth Test Encoder"),
    });
    renderer.render(&mut encoder, &queue, &transforms, light, FAR, &objects);
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &renderer.cubemap.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::DepthOnly,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(RESOLUTION * 4),
                rows_per_image: Some(RESOLUTION),
            },
        },
        wgpu::Extent3d {
            width: RESOLUTION,
            height: RESOLUTION,
            depth_or_array_layers: 6,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .unwrap();
    rx.receive().await.unwrap().unwrap();
    let data = buffer_slice.get_mapped_range();
    Faces(bytemuck::cast_slice::<u8, f32>(&data).to_vec())
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new()
        .expect("failed to start runtime")
        .block_on(future)
}

#[test]
fn should_store_distance_over_far_plane() {
    let faces = block_on(render_faces(&[]));
    let centre = RESOLUTION / 2;
    for face in 0..6 {
        let depth = faces.depth(face, centre, centre);
        assert!(
            (depth - 5.0 / FAR).abs() < 1e-3,
            "face {face}: centre depth {depth}"
        );
        // Corners look further into the room than the face centre.
        assert!(faces.depth(face, 0, 0) > 0.3, "face {face}: corner");
    }
}

#[test]
fn should_write_each_direction_to_its_own_face() {
    let blocker = Matrix4::from_translation(Vector3::new(2.5, 0.0, 0.0)) * Matrix4::from_scale(0.5);
    let faces = block_on(render_faces(&[blocker]));
    let centre = RESOLUTION / 2;

    // The blocker's near side is 2 units from the light on +X only.
    assert!((faces.depth(0, centre, centre) - 2.0 / FAR).abs() < 1e-3);
    for face in 1..6 {
        assert!((faces.depth(face, centre, centre) - 5.0 / FAR).abs() < 1e-3);
    }
}

#[test]
fn should_keep_up_at_the_top_of_side_faces() {
    // Small cube above the +X axis: it must show in the upper half of face +X.
    let blocker = Matrix4::from_translation(Vector3::new(2.5, 1.0, 0.0)) * Matrix4::from_scale(0.3);
    let faces = block_on(render_faces(&[blocker]));
    let centre = RESOLUTION / 2;

    let upper = faces.depth(0, 17, centre);
    let lower = faces.depth(0, 46, centre);
    assert!(upper < 0.15, "upper half depth {upper}");
    assert!(lower > 0.2, "lower half depth {lower}");
}
