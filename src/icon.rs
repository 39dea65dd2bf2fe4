use image::{Rgba, RgbaImage};
use std::path::Path;

/// Edge length in pixels of an icon at zoom 1.0.
pub const BASE_ICON_SIZE: u32 = 64;

const PLACEHOLDER_OFFSET: u32 = 10;
const PLACEHOLDER_SIDE: f32 = 44.0;
const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Straight (non-premultiplied) RGBA pixels.
pub type RasterImage = RgbaImage;

/// Produces the icon shown for a shortcut target.
///
/// Implementations never fail outward: anything that goes wrong yields
/// [`placeholder`] for the requested scale.
pub trait IconResolver {
    fn resolve(&self, executable: &Path, scale: f32) -> RasterImage;
}

/// Side length of an icon drawn at `scale`, truncated to whole pixels.
pub fn icon_size(scale: f32) -> u32 {
    ((BASE_ICON_SIZE as f32 * scale) as u32).max(1)
}

/// Transparent square with a light grey outline, used whenever a real icon
/// cannot be produced. The output depends only on `scale`.
pub fn placeholder(scale: f32) -> RasterImage {
    let size = icon_size(scale);
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let side = (PLACEHOLDER_SIDE * scale) as u32;
    if side == 0 || PLACEHOLDER_OFFSET >= size {
        return img;
    }
    let lo = PLACEHOLDER_OFFSET;
    let hi = (lo + side).min(size - 1);
    for i in lo..=hi {
        img.put_pixel(i, lo, PLACEHOLDER_COLOR);
        img.put_pixel(lo, i, PLACEHOLDER_COLOR);
        if lo + side < size {
            img.put_pixel(i, hi, PLACEHOLDER_COLOR);
            img.put_pixel(hi, i, PLACEHOLDER_COLOR);
        }
    }
    img
}

/// Icon resolver backed by the operating system.
///
/// On Windows the first icon embedded in the executable is rendered into a
/// 32-bit bitmap; on other platforms every lookup yields the placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIconResolver;

impl IconResolver for SystemIconResolver {
    fn resolve(&self, executable: &Path, scale: f32) -> RasterImage {
        if !executable.is_file() {
            tracing::debug!(path = %executable.display(), "icon target missing; using placeholder");
            return placeholder(scale);
        }
        match extract(executable, icon_size(scale)) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(path = %executable.display(), error = %e, "icon extraction failed");
                placeholder(scale)
            }
        }
    }
}

#[cfg(windows)]
fn extract(path: &Path, size: u32) -> anyhow::Result<RasterImage> {
    win::extract_icon(path, size)
}

#[cfg(not(windows))]
fn extract(_path: &Path, _size: u32) -> anyhow::Result<RasterImage> {
    Err(anyhow::anyhow!("icon extraction is only implemented for Windows"))
}

#[cfg(windows)]
mod win {
    use super::RasterImage;
    use anyhow::{anyhow, Result};
    use std::path::Path;
    use windows::core::HSTRING;
    use windows::Win32::Foundation::{HANDLE, HWND};
    use windows::Win32::Graphics::Gdi::{
        CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC,
        SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HBRUSH,
        HDC, HGDIOBJ,
    };
    use windows::Win32::UI::Shell::ExtractIconExW;
    use windows::Win32::UI::WindowsAndMessaging::{
        DestroyIcon, DrawIconEx, DI_MASK, DI_NORMAL, HICON,
    };

    struct IconHandle(HICON);

    impl Drop for IconHandle {
        fn drop(&mut self) {
            unsafe {
                let _ = DestroyIcon(self.0);
            }
        }
    }

    struct ScreenDc(HDC);

    impl Drop for ScreenDc {
        fn drop(&mut self) {
            unsafe {
                let _ = ReleaseDC(HWND::default(), self.0);
            }
        }
    }

    struct MemoryDc(HDC);

    impl Drop for MemoryDc {
        fn drop(&mut self) {
            unsafe {
                let _ = DeleteDC(self.0);
            }
        }
    }

    /// A top-down 32-bit DIB section selected into a memory DC. Dropping it
    /// restores the previous selection before deleting the bitmap.
    struct DibSection<'a> {
        dc: &'a MemoryDc,
        bitmap: HBITMAP,
        previous: HGDIOBJ,
        bits: *mut u8,
        len: usize,
    }

    impl<'a> DibSection<'a> {
        fn new(screen: &ScreenDc, dc: &'a MemoryDc, size: u32) -> Result<Self> {
            let mut bmi = BITMAPINFO::default();
            bmi.bmiHeader = BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: size as i32,
                biHeight: -(size as i32),
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            };
            let mut bits: *mut core::ffi::c_void = std::ptr::null_mut();
            let bitmap = unsafe {
                CreateDIBSection(
                    screen.0,
                    &bmi,
                    DIB_RGB_COLORS,
                    &mut bits,
                    HANDLE::default(),
                    0,
                )?
            };
            if bits.is_null() {
                unsafe {
                    let _ = DeleteObject(bitmap);
                }
                return Err(anyhow!("CreateDIBSection returned no pixel buffer"));
            }
            let previous = unsafe { SelectObject(dc.0, HGDIOBJ(bitmap.0)) };
            Ok(Self {
                dc,
                bitmap,
                previous,
                bits: bits as *mut u8,
                len: (size as usize) * (size as usize) * 4,
            })
        }

        fn pixels(&self) -> &[u8] {
            unsafe { std::slice::from_raw_parts(self.bits, self.len) }
        }

        fn fill(&mut self, value: u8) {
            unsafe { std::ptr::write_bytes(self.bits, value, self.len) }
        }
    }

    impl Drop for DibSection<'_> {
        fn drop(&mut self) {
            unsafe {
                let _ = SelectObject(self.dc.0, self.previous);
                let _ = DeleteObject(self.bitmap);
            }
        }
    }

    pub(super) fn extract_icon(path: &Path, size: u32) -> Result<RasterImage> {
        let file = HSTRING::from(path.as_os_str());
        let mut large = HICON::default();
        let mut small = HICON::default();
        let count = unsafe {
            ExtractIconExW(
                &file,
                0,
                Some(&mut large as *mut HICON),
                Some(&mut small as *mut HICON),
                1,
            )
        };
        let large = (!large.is_invalid()).then(|| IconHandle(large));
        let small = (!small.is_invalid()).then(|| IconHandle(small));
        if count == 0 {
            return Err(anyhow!("no icons in {}", path.display()));
        }
        let icon = large
            .as_ref()
            .or(small.as_ref())
            .ok_or_else(|| anyhow!("no usable icon in {}", path.display()))?;

        let screen = unsafe { GetDC(HWND::default()) };
        if screen.is_invalid() {
            return Err(anyhow!("GetDC failed for icon extraction"));
        }
        let screen = ScreenDc(screen);
        let mem = unsafe { CreateCompatibleDC(screen.0) };
        if mem.is_invalid() {
            return Err(anyhow!("CreateCompatibleDC failed for icon extraction"));
        }
        let mem = MemoryDc(mem);
        let side = size as i32;

        let mut colour = DibSection::new(&screen, &mem, size)?;
        colour.fill(0);
        unsafe { DrawIconEx(mem.0, 0, 0, icon.0, side, side, 0, HBRUSH::default(), DI_NORMAL)? };
        let mut bgra = colour.pixels().to_vec();
        drop(colour);

        // Icons without per-pixel alpha take transparency from their AND mask,
        // which draws black where the glyph is opaque.
        if bgra.chunks_exact(4).all(|px| px[3] == 0) {
            let mut mask = DibSection::new(&screen, &mem, size)?;
            mask.fill(0xff);
            unsafe { DrawIconEx(mem.0, 0, 0, icon.0, side, side, 0, HBRUSH::default(), DI_MASK)? };
            for (px, m) in bgra.chunks_exact_mut(4).zip(mask.pixels().chunks_exact(4)) {
                px[3] = if m[0] == 0 { 255 } else { 0 };
            }
        }

        for px in bgra.chunks_exact_mut(4) {
            px.swap(0, 2);
            // DIB sections hold premultiplied colour
            let a = px[3] as u16;
            if a > 0 && a < 255 {
                for c in &mut px[..3] {
                    *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }

        RasterImage::from_raw(size, size, bgra)
            .ok_or_else(|| anyhow!("icon buffer size mismatch"))
    }
}
