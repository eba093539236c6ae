/// Matrix builders for the model -> view -> projection pipeline
use nalgebra::{Matrix4, Vector3};

use crate::error::{ArError, Result};

/// Transform builder for 4x4 homogeneous matrices
pub struct Transform;

impl Transform {
    /// Build a matrix from 16 column-major elements, the layout the tracking
    /// engine hands out for projection, view and pose matrices.
    pub fn from_column_major(elements: &[f32]) -> Result<Matrix4<f32>> {
        if elements.len() != 16 {
            return Err(ArError::MatrixShape {
                expected: 16,
                actual: elements.len(),
            });
        }
        Ok(Matrix4::from_column_slice(elements))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a right-handed perspective matrix (OpenGL clip conventions)
    pub fn perspective_matrix(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, fov_y_degrees.to_radians(), near, far)
    }

    /// Create a model-view-projection matrix.
    ///
    /// The model-view product is formed first and the projection applied on
    /// top of it, matching the order the tracking engine composes them.
    pub fn mvp_matrix(
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        model: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        let model_view = view * model;
        projection * model_view
    }
}
