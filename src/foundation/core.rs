use crate::foundation::error::{ThumbnailError, ThumbnailResult};

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Straight-alpha RGBA color with `f32` channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `RGB`, `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> ThumbnailResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let digit = |i: usize| -> ThumbnailResult<u8> {
            let c = hex.as_bytes()[i] as char;
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ThumbnailError::validation(format!("invalid hex color '{s}'")))
        };
        let byte = |i: usize| -> ThumbnailResult<u8> { Ok(digit(i)? * 16 + digit(i + 1)?) };

        let (r, g, b, a) = match hex.len() {
            3 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255),
            6 => (byte(0)?, byte(2)?, byte(4)?, 255),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => {
                return Err(ThumbnailError::validation(format!(
                    "invalid hex color '{s}': expected 3, 6 or 8 digits"
                )));
            }
        };
        Ok(Self::from_rgba8([r, g, b, a]))
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::rgba(
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
            f32::from(px[3]) / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn add(self, o: Self) -> Self {
        Self::rgba(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }

    pub fn mul(self, o: Self) -> Self {
        Self::rgba(self.r * o.r, self.g * o.g, self.b * o.b, self.a * o.a)
    }

    pub fn scale(self, k: f32) -> Self {
        Self::rgba(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    pub fn lerp(self, o: Self, t: f32) -> Self {
        self.add(o.add(self.scale(-1.0)).scale(t))
    }

    /// Clamp the color channels to 1.0 and replace alpha.
    pub fn saturate_with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r.min(1.0), self.g.min(1.0), self.b.min(1.0), a)
    }
}

/// Axis-aligned bounding box in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut out = Self {
            min: first,
            max: first,
        };
        for p in it {
            out.min = out.min.min(p);
            out.max = out.max.max(p);
        }
        Some(out)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}
