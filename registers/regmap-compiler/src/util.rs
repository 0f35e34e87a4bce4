// Licensed under the Apache-2.0 license

//! Name conversion helpers for generated identifiers and output files.

/// Converts a name to snake_case.
///
/// - Punctuation and whitespace become underscores
/// - CamelCase transitions get underscore separators
/// - Runs of capitals stay together
///
/// # Examples
/// ```
/// use mcu_regmap_compiler::util::snake_case;
/// assert_eq!(snake_case("SysCtrl"), "sys_ctrl");
/// assert_eq!(snake_case("Uart2Regs"), "uart2_regs");
/// assert_eq!(snake_case("dma-ctrl"), "dma_ctrl");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut result = String::new();
    let mut prev = None;
    for c in name.chars() {
        if c.is_ascii_whitespace() || c.is_ascii_punctuation() {
            if prev.is_some() && prev != Some('_') {
                result.push('_');
            }
            prev = Some('_');
            continue;
        }
        if let Some(prev) = prev {
            if (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase() {
                result.push('_');
            }
        }
        prev = Some(c);
        result.push(c.to_ascii_lowercase());
    }
    result.trim_end_matches('_').to_string()
}

/// Makes a C++ class identifier from a file stem, keeping its case.
///
/// # Examples
/// ```
/// use mcu_regmap_compiler::util::class_name;
/// assert_eq!(class_name("SysCtrl"), "SysCtrl");
/// assert_eq!(class_name("sys-ctrl.v2"), "sys_ctrl_v2");
/// assert_eq!(class_name("2Timer"), "_2Timer");
/// ```
pub fn class_name(stem: &str) -> String {
    let mut result = String::new();
    if stem.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        result.push('_');
    }
    result.extend(stem.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    result
}

/// Formats `val` as lowercase hex with at least `digits` digits.
///
/// # Examples
/// ```
/// use mcu_regmap_compiler::util::hex_padded;
/// assert_eq!(hex_padded(0x2, 3), "0x002");
/// assert_eq!(hex_padded(0x1a2, 4), "0x01a2");
/// assert_eq!(hex_padded(0x12345, 4), "0x12345");
/// ```
pub fn hex_padded(val: u64, digits: usize) -> String {
    format!("0x{val:0digits$x}")
}

/// Output file names derived from an input file stem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputNames {
    /// Class name used inside the generated source.
    pub class_name: String,
    /// Generated C++ source file.
    pub source_file: String,
    /// Generated golden-values header.
    pub golden_file: String,
}

impl OutputNames {
    /// Derive all output names from the stem of the input file.
    ///
    /// # Examples
    /// ```
    /// use mcu_regmap_compiler::util::OutputNames;
    /// let names = OutputNames::from_stem("SysCtrl");
    /// assert_eq!(names.class_name, "SysCtrl");
    /// assert_eq!(names.source_file, "sys_ctrl.cpp");
    /// assert_eq!(names.golden_file, "sys_ctrl_golden.h");
    /// ```
    pub fn from_stem(stem: &str) -> Self {
        let file_stem = snake_case(stem);
        Self {
            class_name: class_name(stem),
            source_file: format!("{file_stem}.cpp"),
            golden_file: format!("{file_stem}_golden.h"),
        }
    }
}
