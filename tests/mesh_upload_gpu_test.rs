#![cfg(feature = "integration-tests")]

use cgmath::Vector3;
use rt_render::{
    context::request_device,
    data_structures::primitives::cube,
    light::{LightOrbit, PointLight},
    pipelines::{light::LightBox, shadow_scene::mk_globals_layout},
    resources::mesh::create_mesh,
};

fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let runtime = tokio::runtime::Runtime::new().expect("failed to start runtime");
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let (_, device, queue) = runtime
        .block_on(request_device(&instance, None))
        .expect("no graphics device available");
    (device, queue)
}

#[test]
fn should_skip_geometry_without_faces() {
    let (device, _queue) = headless_device();
    let (vertices, indices) = cube();

    assert!(create_mesh(&device, "no vertices", &[], &indices, 0).is_none());
    assert!(create_mesh(&device, "no indices", &vertices, &[], 0).is_none());

    let mesh = create_mesh(&device, "cube", &vertices, &indices, 0).expect("cube has faces");
    assert_eq!(mesh.num_elements, 36);
}

#[test]
fn should_build_light_marker_without_material() {
    let (device, _queue) = headless_device();
    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        width: 64,
        height: 64,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    let light = PointLight::new(Vector3::new(0.0, 1.0, 0.0), LightOrbit::default());

    let light_box = LightBox::new(&device, &config, &mk_globals_layout(&device), light);

    assert_eq!(light_box.model().meshes.len(), 1);
    assert!(light_box.model().materials.is_empty());
    assert_eq!(light_box.position(), Vector3::new(0.0, 1.0, 0.0));
}
