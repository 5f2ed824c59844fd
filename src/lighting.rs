//! Light sources for flat shading. The textured pipeline itself does not
//! apply lighting; callers evaluate an intensity per face and fold it into
//! the color with `Color * f32`.

use crate::math::Vec3;
use crate::color::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LightType {
    #[default]
    Directional,
    Point,
    Spot,
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub light_type: LightType,
    pub color: Color,
    pub position: Vec3,
    pub direction: Vec3,
    pub intensity: f32,
    pub range: f32,
    /// Full cone angle in degrees, for spot lights.
    pub spot_angle: f32,

    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::Directional,
            color: Color::WHITE,
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, -1.0, 0.0),
            intensity: 1.0,
            range: 100.0,
            spot_angle: 30.0,
            constant_attenuation: 0.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
        }
    }
}

impl Light {
    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            direction,
            color,
            intensity,
            ..Self::default()
        }
    }

    pub fn point(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            color,
            intensity,
            range,
            ..Self::default()
        }
    }

    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: Color,
        intensity: f32,
        angle: f32,
    ) -> Self {
        Self {
            light_type: LightType::Spot,
            position,
            direction,
            color,
            intensity,
            spot_angle: angle,
            ..Self::default()
        }
    }

    /// Lambertian intensity this light contributes at a surface point with
    /// the given unit normal. Always in [0, intensity].
    pub fn intensity_at(&self, point: Vec3, normal: Vec3) -> f32 {
        match self.light_type {
            LightType::Directional => {
                normal.dot(-self.direction.normalized()).max(0.0) * self.intensity
            }
            LightType::Point => self.intensity * self.falloff(point) * self.lambert(point, normal),
            LightType::Spot => {
                let to_point = (point - self.position).normalized();
                let cone_cos = (self.spot_angle * 0.5).to_radians().cos();
                if to_point.dot(self.direction.normalized()) < cone_cos {
                    return 0.0;
                }
                self.intensity * self.falloff(point) * self.lambert(point, normal)
            }
        }
    }

    fn lambert(&self, point: Vec3, normal: Vec3) -> f32 {
        normal.dot((self.position - point).normalized()).max(0.0)
    }

    fn falloff(&self, point: Vec3) -> f32 {
        let d = (point - self.position).length();
        if d > self.range {
            return 0.0;
        }

        let attenuation = self.constant_attenuation
            + self.linear_attenuation * d
            + self.quadratic_attenuation * d * d;

        if attenuation > 0.0 {
            1.0 / attenuation
        } else {
            // No attenuation configured: fall off linearly to the range edge.
            1.0 - d / self.range
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_lambert() {
        let light = Light::directional(Vec3::new(0.0, -1.0, 0.0), Color::WHITE, 1.0);

        let up = Vec3::new(0.0, 1.0, 0.0);
        assert!((light.intensity_at(Vec3::ZERO, up) - 1.0).abs() < 1e-6);

        // Facing away from the light contributes nothing.
        assert_eq!(light.intensity_at(Vec3::ZERO, -up), 0.0);
    }

    #[test]
    fn point_light_range() {
        let light = Light::point(Vec3::new(0.0, 10.0, 0.0), Color::WHITE, 1.0, 5.0);
        let up = Vec3::new(0.0, 1.0, 0.0);

        // The origin is 10 units away, outside the 5 unit range.
        assert_eq!(light.intensity_at(Vec3::ZERO, up), 0.0);

        let near = Vec3::new(0.0, 9.0, 0.0);
        assert!(light.intensity_at(near, up) > 0.5);
    }

    #[test]
    fn spot_cone_cutoff() {
        let light = Light::spot(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Color::WHITE,
            1.0,
            40.0,
        );
        let up = Vec3::new(0.0, 1.0, 0.0);

        assert!(light.intensity_at(Vec3::ZERO, up) > 0.0);
        // Well outside the 20 degree half-angle.
        assert_eq!(light.intensity_at(Vec3::new(30.0, 0.0, 0.0), up), 0.0);
    }
}
