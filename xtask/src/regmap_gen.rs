// Licensed under the Apache-2.0 license

//! Generate C++ register component sources and golden reset-value headers
//! from register map description files.

use anyhow::{bail, Context, Result};
use log::info;
use mcu_regmap_compiler::{compile, CompilerConfig, OutputNames};
use std::fs;
use std::path::{Path, PathBuf};

/// Which files a run writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Artifacts {
    Source,
    Golden,
    Both,
}

impl Artifacts {
    fn source(self) -> bool {
        matches!(self, Artifacts::Source | Artifacts::Both)
    }

    fn golden(self) -> bool {
        matches!(self, Artifacts::Golden | Artifacts::Both)
    }
}

/// Build the compiler configuration from an optional TOML file and
/// command-line overrides.
pub fn load_config(
    config_file: Option<&Path>,
    byte_width: Option<u8>,
    base_align: Option<u64>,
) -> Result<CompilerConfig> {
    let mut config = match config_file {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            CompilerConfig::from_toml(&src)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => CompilerConfig::with_defaults(),
    };
    if let Some(width) = byte_width {
        config = config.register_byte_width(width);
    }
    if let Some(align) = base_align {
        config = config.base_alignment(align);
    }
    config.validate()?;
    Ok(config)
}

/// Compile `input` and write the requested artifacts into `out_dir`.
///
/// Output names derive from the input file stem, e.g. `SysCtrl.txt`
/// produces `sys_ctrl.cpp` and `sys_ctrl_golden.h`. Returns the paths written.
pub fn generate(
    input: &Path,
    out_dir: &Path,
    config: &CompilerConfig,
    artifacts: Artifacts,
) -> Result<Vec<PathBuf>> {
    info!("Generating registers from: {}", input.display());

    let Some(stem) = input.file_stem().and_then(|s| s.to_str()) else {
        bail!("cannot derive output names from {}", input.display());
    };
    let names = OutputNames::from_stem(stem);

    let src = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let map = compile(&src, config)
        .with_context(|| format!("failed to compile {}", input.display()))?;

    // Render everything before touching the filesystem so a failure never
    // leaves one artifact without the other.
    let mut outputs = Vec::new();
    if artifacts.source() {
        outputs.push((
            out_dir.join(&names.source_file),
            map.generate_cpp(&names.class_name),
        ));
    }
    if artifacts.golden() {
        outputs.push((out_dir.join(&names.golden_file), map.generate_golden()));
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut written = Vec::new();
    for (path, code) in outputs {
        fs::write(&path, code).with_context(|| format!("failed to write {}", path.display()))?;
        info!("Successfully generated {}", path.display());
        written.push(path);
    }
    Ok(written)
}
