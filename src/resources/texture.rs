//! Texture file I/O and raw pixel records.
//!
//! [`TextureData`] is the CPU-side image handed from the decoder to the GPU
//! upload in [`crate::data_structures::texture::Texture::from_data`]. Pixels
//! keep the channel count of the source file (1 to 4 channels, 8 bits each)
//! and carry an explicit row stride.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use image::{ColorType, DynamicImage, ImageFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextureData {
    pub path: PathBuf,
    pub kind: TextureKind,
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub num_components: u8,
    /// Bytes from the start of one row to the start of the next.
    pub row_stride: usize,
}

impl TextureData {
    /// Wrap tightly packed pixels.
    pub fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        num_components: u8,
        kind: TextureKind,
    ) -> anyhow::Result<Self> {
        let row_stride = width as usize * num_components as usize;
        Self::with_stride(pixels, width, height, num_components, row_stride, kind)
    }

    pub fn with_stride(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        num_components: u8,
        row_stride: usize,
        kind: TextureKind,
    ) -> anyhow::Result<Self> {
        if !(1..=4).contains(&num_components) {
            bail!("Unexpected number of components {num_components}");
        }
        let row_bytes = width as usize * num_components as usize;
        if row_stride < row_bytes {
            bail!("Row stride {row_stride} is shorter than a row of {row_bytes} bytes");
        }
        let needed = match height {
            0 => 0,
            h => row_stride * (h as usize - 1) + row_bytes,
        };
        if pixels.len() < needed {
            bail!(
                "Pixel buffer holds {} bytes but a {}x{}x{} image needs {}",
                pixels.len(),
                width,
                height,
                num_components,
                needed
            );
        }
        Ok(Self {
            path: PathBuf::new(),
            kind,
            pixels,
            width,
            height,
            num_components,
            row_stride,
        })
    }

    /// Take ownership of a decoded image, keeping its channel count.
    pub fn from_image(
        img: DynamicImage,
        path: impl Into<PathBuf>,
        kind: TextureKind,
    ) -> anyhow::Result<Self> {
        let (width, height) = (img.width(), img.height());
        let num_components = img.color().channel_count();
        let pixels = match num_components {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };
        let mut data = Self::new(pixels, width, height, num_components.min(4), kind)?;
        data.path = path.into();
        Ok(data)
    }

    pub fn from_bytes(
        bytes: &[u8],
        path: impl Into<PathBuf>,
        kind: TextureKind,
    ) -> anyhow::Result<Self> {
        let path = path.into();
        let img = image::load_from_memory(bytes)
            .with_context(|| format!("Texture failed to decode from {}", path.display()))?;
        Self::from_image(img, path, kind)
    }

    /// Single RGBA texel, used where a material has no texture.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            path: PathBuf::from("<solid>"),
            kind: TextureKind::Diffuse,
            pixels: rgba.to_vec(),
            width: 1,
            height: 1,
            num_components: 4,
            row_stride: 4,
        }
    }

    /// `size` x `size` RGBA checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let pixels = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .flat_map(|(x, y)| if (x / cell + y / cell) % 2 == 0 { a } else { b })
            .collect();
        Self {
            path: PathBuf::from("<checkerboard>"),
            kind: TextureKind::Diffuse,
            pixels,
            width: size,
            height: size,
            num_components: 4,
            row_stride: size as usize * 4,
        }
    }

    fn row_bytes(&self) -> usize {
        self.width as usize * self.num_components as usize
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_stride;
        &self.pixels[start..start + self.row_bytes()]
    }

    /// Pixels without row padding.
    pub fn tightly_packed(&self) -> Cow<'_, [u8]> {
        if self.row_stride == self.row_bytes() {
            let len = self.row_bytes() * self.height as usize;
            return Cow::Borrowed(&self.pixels[..len]);
        }
        Cow::Owned((0..self.height).flat_map(|y| self.row(y)).copied().collect())
    }

    /// Expand to RGBA8 for upload. Only 1, 3 and 4 channel images are
    /// supported; single-channel data stays in the red channel.
    pub fn to_rgba8(&self) -> anyhow::Result<Vec<u8>> {
        let packed = self.tightly_packed();
        let rgba = match self.num_components {
            1 => packed.iter().flat_map(|&r| [r, 0, 0, 255]).collect(),
            3 => packed
                .chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], 255])
                .collect(),
            4 => packed.into_owned(),
            n => bail!(
                "Unexpected number of components {} in texture from {}",
                n,
                self.path.display()
            ),
        };
        Ok(rgba)
    }

    fn color_type(&self) -> anyhow::Result<ColorType> {
        Ok(match self.num_components {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            4 => ColorType::Rgba8,
            n => bail!("Unexpected number of components {n}"),
        })
    }
}

/// Use the host's path separator throughout.
pub fn clean_path(path: impl AsRef<Path>) -> PathBuf {
    let raw = path.as_ref().to_string_lossy();
    let cleaned = if cfg!(windows) {
        raw.replace('/', "\\")
    } else {
        raw.replace('\\', "/")
    };
    PathBuf::from(cleaned)
}

pub fn texture_from_file(
    filename: impl AsRef<Path>,
    kind: TextureKind,
) -> anyhow::Result<TextureData> {
    let path = clean_path(filename);
    let img = image::open(&path)
        .with_context(|| format!("Texture failed to load at path: {}", path.display()))?;
    log::debug!("loaded {} texture {}", kind.as_str(), path.display());
    TextureData::from_image(img, path, kind)
}

/// Load `file` relative to `directory`, e.g. a texture named by a material file.
pub fn texture_from_dir(
    file: impl AsRef<Path>,
    directory: impl AsRef<Path>,
    kind: TextureKind,
) -> anyhow::Result<TextureData> {
    texture_from_file(directory.as_ref().join(clean_path(file)), kind)
}

/// Write the texture as PNG.
pub fn texture_to_file(filename: impl AsRef<Path>, texture: &TextureData) -> anyhow::Result<()> {
    let path = clean_path(filename);
    image::save_buffer_with_format(
        &path,
        &texture.tightly_packed(),
        texture.width,
        texture.height,
        texture.color_type()?,
        ImageFormat::Png,
    )
    .with_context(|| format!("Texture failed to write to path: {}", path.display()))
}

pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("diffuse_bind_group_layout"),
    })
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and decode a texture without blocking the runtime on file I/O.
pub async fn load_texture_data(path: &Path, kind: TextureKind) -> anyhow::Result<TextureData> {
    let path = clean_path(path);
    let bytes = load_binary(&path).await?;
    TextureData::from_bytes(&bytes, path, kind)
}
