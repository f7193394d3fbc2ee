use std::path::PathBuf;
use thiserror::Error;

/// Failure during renderer or pipeline setup. Each variant names the setup
/// stage that failed, so a partially initialized program never reaches the
/// frame loop.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create rendering surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible hardware adapter found")]
    AdapterUnavailable,

    #[error("failed to acquire graphics device")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to read shader binary {}", .path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader binary {} is not valid SPIR-V", .path.display())]
    ShaderFormat { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_errors_name_the_file() {
        let error = InitError::ShaderRead {
            path: PathBuf::from("VertexShader.cso"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(
            error.to_string(),
            "failed to read shader binary VertexShader.cso"
        );

        let error = InitError::ShaderFormat {
            path: PathBuf::from("PixelShader.cso"),
        };
        assert_eq!(
            error.to_string(),
            "shader binary PixelShader.cso is not valid SPIR-V"
        );
    }

    #[test]
    fn test_missing_adapter_is_reported() {
        assert_eq!(
            InitError::AdapterUnavailable.to_string(),
            "no compatible hardware adapter found"
        );
    }
}
