//! JSON scene descriptions.
//!
//! A description is plain data straight from serde. `validate` checks it and
//! `build_scene` / `build_camera` turn it into the renderer's types, so bad
//! input becomes a [`SceneError`] rather than a constructor panic.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Camera, Color, Material, RenderObject, Scene, SceneError, Sphere, Vec3};

/// Object count beyond which linear traversal gets noticeably slow.
const LARGE_SCENE_OBJECTS: usize = 512;

/// A whole scene as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    pub objects: Vec<ObjectDescription>,
}

/// Pinhole camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDescription {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    pub focal_length: f32,
    pub viewport_height: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            focal_length: Camera::DEFAULT_FOCAL_LENGTH,
            viewport_height: Camera::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// One sphere and its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: MaterialDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Diffuse {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        roughness: f32,
    },
    Dielectric {
        refractive_index: f32,
    },
}

impl SceneDescription {
    /// The four-sphere scene: glass, rough violet metal, gold mirror, green ground.
    pub fn showcase() -> Self {
        Self {
            camera: CameraDescription::default(),
            objects: vec![
                ObjectDescription {
                    center: [0.5, -0.3, -3.5],
                    radius: 1.5,
                    material: MaterialDescription::Dielectric {
                        refractive_index: 1.5,
                    },
                },
                ObjectDescription {
                    center: [-2.5, 0.0, -5.0],
                    radius: 1.5,
                    material: MaterialDescription::Metal {
                        albedo: [0.5, 0.3, 0.8],
                        roughness: 0.3,
                    },
                },
                ObjectDescription {
                    center: [0.0, -102.0, -5.5],
                    radius: 100.0,
                    material: MaterialDescription::Diffuse {
                        albedo: [0.42, 0.7, 0.42],
                    },
                },
                ObjectDescription {
                    center: [3.8, 2.7, -6.5],
                    radius: 1.0,
                    material: MaterialDescription::Metal {
                        albedo: [0.94, 0.76, 0.11],
                        roughness: 0.0,
                    },
                },
            ],
        }
    }

    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let description = Self::from_json(&fs::read_to_string(path)?)?;
        description.validate()?;
        log::info!(
            "Loaded {} objects from {}",
            description.objects.len(),
            path.display()
        );
        Ok(description)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the renderer's constructors would reject.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.objects.is_empty() {
            return Err(SceneError::Empty);
        }
        if self.objects.len() > LARGE_SCENE_OBJECTS {
            log::warn!(
                "Scene has {} objects; every ray tests all of them",
                self.objects.len()
            );
        }

        for (index, object) in self.objects.iter().enumerate() {
            object.validate(index)?;
        }
        self.camera.validate()
    }

    /// Validate and build the render scene, keeping object order.
    pub fn build_scene(&self) -> Result<Scene, SceneError> {
        self.validate()?;
        Ok(self.objects.iter().map(ObjectDescription::build).collect())
    }

    /// Validate and build an initialized camera for the given resolution.
    pub fn build_camera(&self, width: u32, height: u32) -> Result<Camera, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution must be non-zero, got {width}x{height}"
            )));
        }
        self.camera.validate()?;

        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(
                Vec3::from(self.camera.position),
                Vec3::from(self.camera.look_at),
                Vec3::from(self.camera.up),
            )
            .with_lens(self.camera.focal_length, self.camera.viewport_height);
        camera.initialize();
        Ok(camera)
    }
}

impl CameraDescription {
    fn validate(&self) -> Result<(), SceneError> {
        let lens_ok = |v: f32| v.is_finite() && v > 0.0;
        if !lens_ok(self.focal_length) {
            return Err(SceneError::InvalidCamera(format!(
                "focal length must be positive, got {}",
                self.focal_length
            )));
        }
        if !lens_ok(self.viewport_height) {
            return Err(SceneError::InvalidCamera(format!(
                "viewport height must be positive, got {}",
                self.viewport_height
            )));
        }

        let forward = Vec3::from(self.look_at) - Vec3::from(self.position);
        let up = Vec3::from(self.up);
        if !forward.is_finite() || forward.length_squared() < 1e-12 {
            return Err(SceneError::InvalidCamera(
                "look_at must differ from position".to_string(),
            ));
        }
        if !up.is_finite() || up.cross(forward).length_squared() < 1e-12 {
            return Err(SceneError::InvalidCamera(
                "up must not be parallel to the view direction".to_string(),
            ));
        }
        Ok(())
    }
}

impl ObjectDescription {
    fn validate(&self, index: usize) -> Result<(), SceneError> {
        let radius_ok = self.radius.is_finite() && self.radius > 0.0;
        if !Vec3::from(self.center).is_finite() || !radius_ok {
            return Err(SceneError::InvalidRadius {
                index,
                radius: self.radius,
            });
        }

        let albedo_ok = |albedo: &[f32; 3]| albedo.iter().all(|c| c.is_finite() && *c >= 0.0);
        match &self.material {
            MaterialDescription::Diffuse { albedo } => {
                if !albedo_ok(albedo) {
                    return Err(SceneError::InvalidAlbedo { index });
                }
            }
            MaterialDescription::Metal { albedo, roughness } => {
                if !albedo_ok(albedo) {
                    return Err(SceneError::InvalidAlbedo { index });
                }
                if !(roughness.is_finite() && *roughness >= 0.0) {
                    return Err(SceneError::InvalidRoughness {
                        index,
                        roughness: *roughness,
                    });
                }
            }
            MaterialDescription::Dielectric { refractive_index } => {
                if !(refractive_index.is_finite() && *refractive_index > 0.0) {
                    return Err(SceneError::InvalidRefractiveIndex {
                        index,
                        refractive_index: *refractive_index,
                    });
                }
            }
        }
        Ok(())
    }

    /// Panics on invalid values; call `validate` first.
    fn build(&self) -> RenderObject {
        let material = match self.material {
            MaterialDescription::Diffuse { albedo } => Material::diffuse(Color::from(albedo)),
            MaterialDescription::Metal { albedo, roughness } => {
                Material::metal(Color::from(albedo), roughness)
            }
            MaterialDescription::Dielectric { refractive_index } => {
                Material::dielectric(refractive_index)
            }
        };
        RenderObject::new(Sphere::new(Vec3::from(self.center), self.radius), material)
    }
}
