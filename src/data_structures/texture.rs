//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources
//! with a view and sampler, and [`DepthCubemap`], the six-layer depth target
//! written by the shadow depth pass and sampled by the shading pass.

use anyhow::bail;

use crate::resources::texture::TextureData;

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing the on-screen pass.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// Upload a decoded image, consuming its pixel buffer.
    ///
    /// Single-channel images become `R8Unorm`; three and four channel images
    /// become sRGB RGBA. Any other channel count is rejected.
    pub fn from_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: TextureData,
        label: Option<&str>,
    ) -> anyhow::Result<Self> {
        let (format, bytes_per_texel, pixels) = match data.num_components {
            1 => (
                wgpu::TextureFormat::R8Unorm,
                1,
                data.tightly_packed().into_owned(),
            ),
            3 | 4 => (wgpu::TextureFormat::Rgba8UnormSrgb, 4, data.to_rgba8()?),
            n => bail!(
                "Unexpected number of components {} in texture from {}",
                n,
                data.path.display()
            ),
        };

        let size = wgpu::Extent3d {
            width: data.width.max(1),
            height: data.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if data.width > 0 && data.height > 0 {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                &pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_texel * data.width),
                    rows_per_image: Some(data.height),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_default_sampler(device));

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

/// Six-layer depth texture seen as a cube for sampling and as six 2D views
/// for rendering, one per face in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Debug)]
pub struct DepthCubemap {
    pub texture: wgpu::Texture,
    pub cube_view: wgpu::TextureView,
    pub face_views: [wgpu::TextureView; 6],
    pub sampler: wgpu::Sampler,
    pub resolution: u32,
}

impl DepthCubemap {
    pub fn new(device: &wgpu::Device, resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Depth Cubemap"),
            size: wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let cube_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Shadow Depth Cube View"),
            format: Some(Texture::DEPTH_FORMAT),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            aspect: wgpu::TextureAspect::DepthOnly,
            base_array_layer: 0,
            array_layer_count: Some(6),
            ..Default::default()
        });

        let face_views = std::array::from_fn(|face| {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some(&format!("Shadow Depth Face {} View", face)),
                format: Some(Texture::DEPTH_FORMAT),
                dimension: Some(wgpu::TextureViewDimension::D2),
                aspect: wgpu::TextureAspect::DepthOnly,
                base_array_layer: face as u32,
                array_layer_count: Some(1),
                ..Default::default()
            })
        });

        // Depth is compared by hand in the shader, so plain nearest sampling.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Depth Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            cube_view,
            face_views,
            sampler,
            resolution,
        }
    }
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
