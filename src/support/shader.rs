use crate::InitError;
use std::{borrow::Cow, fs, path::Path};
use wgpu::{Device, ShaderModule};

const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Loads a precompiled shader binary from disk and creates a shader module
/// from it. The file is treated as an opaque blob apart from SPIR-V framing
/// (word alignment and magic number), which wgpu requires up front.
pub fn load_shader(device: &Device, path: impl AsRef<Path>) -> Result<ShaderModule, InitError> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| InitError::ShaderRead {
        path: path.to_path_buf(),
        source,
    })?;

    let words = spirv_words(&bytes).ok_or_else(|| InitError::ShaderFormat {
        path: path.to_path_buf(),
    })?;

    log::debug!("Loaded shader binary {} ({} bytes)", path.display(), bytes.len());

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.file_name().and_then(|name| name.to_str()),
        source: wgpu::ShaderSource::SpirV(Cow::Owned(words)),
    }))
}

fn spirv_words(bytes: &[u8]) -> Option<Vec<u32>> {
    if bytes.is_empty() || bytes.len() % 4 != 0 {
        return None;
    }

    let words = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect::<Vec<_>>();

    (words[0] == SPIRV_MAGIC).then_some(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    #[test]
    fn test_well_formed_binary_is_accepted() {
        // Magic, version 1.0, generator, bound, schema
        let header = [SPIRV_MAGIC, 0x0001_0000, 0, 1, 0];
        let words = spirv_words(&encode(&header)).unwrap();
        assert_eq!(words, header);
    }

    #[test]
    fn test_empty_binary_is_rejected() {
        assert!(spirv_words(&[]).is_none());
    }

    #[test]
    fn test_misaligned_binary_is_rejected() {
        let mut bytes = encode(&[SPIRV_MAGIC]);
        bytes.push(0);
        assert!(spirv_words(&bytes).is_none());
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        assert!(spirv_words(&encode(&[0xdead_beef, 0, 0])).is_none());
    }
}
