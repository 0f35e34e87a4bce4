// Licensed under the Apache-2.0 license

//! End-to-end tests for the compiler pipeline.

mod test {
    use crate::{
        compile, CompilerConfig, ConfigError, ErrorKind, OutputNames, RegMapError, RegisterMap,
    };

    const SYS_CTRL: &str = include_str!("../test-data/SysCtrl.txt");

    fn compile_default(src: &str) -> Result<RegisterMap, RegMapError> {
        compile(src, &CompilerConfig::with_defaults())
    }

    #[test]
    fn test_sys_ctrl_model() {
        let map = compile_default(SYS_CTRL).unwrap();

        assert_eq!(map.base_address, 0x5000_1000);
        assert_eq!(map.register_byte_width, 2);
        assert_eq!(map.max_offset, 0xa4);

        let rows: Vec<_> = map
            .registers
            .iter()
            .map(|r| (r.name.as_str(), r.offset, r.reset_word))
            .collect();
        assert_eq!(
            rows,
            [
                ("SYS_CTRL_1", 0x002, 0x0051),
                ("SYS_CTRL_2", 0x004, 0xffff),
                ("DEV_STATUS", 0x006, 0x0000),
                ("DEV_ID", 0x0a4, 0x01a2),
            ]
        );

        for reg in &map.registers {
            assert_eq!(reg.offset, reg.address - map.base_address);
        }
    }

    #[test]
    fn test_sys_ctrl_reset_words_match_fields() {
        let map = compile_default(SYS_CTRL).unwrap();
        for reg in &map.registers {
            let mut covered = 0u64;
            for field in &reg.fields {
                let mask = field.bit_range.max_value();
                assert_eq!(
                    (reg.reset_word >> field.bit_range.low) & mask,
                    field.reset_value,
                    "{}.{}",
                    reg.name,
                    field.name
                );
                covered |= mask << field.bit_range.low;
            }
            assert_eq!(reg.reset_word & !covered, 0, "{}", reg.name);
        }
    }

    #[test]
    fn test_sys_ctrl_cpp() {
        let map = compile_default(SYS_CTRL).unwrap();
        let names = OutputNames::from_stem("SysCtrl");
        assert_eq!(names.source_file, "sys_ctrl.cpp");

        let code = map.generate_cpp(&names.class_name);
        println!("{code}");
        assert!(code.starts_with("// SYSCTRL_APB_S BaseAddress : 0x50001000\n"));
        assert!(code.contains("constexpr size_t CNT_REG_END = 0xa4;"));
        assert!(code.contains("constexpr size_t SYS_CTRL_1 = 0x002;"));
        assert!(code.contains("constexpr size_t SYS_CTRL_2 = 0x004;"));
        assert!(code.contains("constexpr size_t DEV_STATUS = 0x006;"));
        assert!(code.contains("constexpr size_t DEV_ID = 0x0a4;"));
        assert!(code.contains("class SysCtrl: public vp::Component {"));
        assert!(code.contains("    reg[SYS_CTRL_1 / REG_BYTE_WIDTH] = 0x51;"));
        assert!(code.contains("    reg[SYS_CTRL_2 / REG_BYTE_WIDTH] = 0xffff;"));
        assert!(code.contains("    reg[DEV_STATUS / REG_BYTE_WIDTH] = 0x0;"));
        assert!(code.contains("    reg[DEV_ID / REG_BYTE_WIDTH] = 0x1a2;"));
    }

    #[test]
    fn test_sys_ctrl_golden() {
        let map = compile_default(SYS_CTRL).unwrap();
        let golden = map.generate_golden();
        let rows: Vec<_> = golden.lines().filter(|l| l.starts_with("  {")).collect();
        assert_eq!(
            rows,
            [
                "  {0x0002, 0x0051}, // SYS_CTRL_1",
                "  {0x0004, 0xffff}, // SYS_CTRL_2",
                "  {0x0006, 0x0000}, // DEV_STATUS",
                "  {0x00a4, 0x01a2}, // DEV_ID",
            ]
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let first = compile_default(SYS_CTRL).unwrap();
        let second = compile_default(SYS_CTRL).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.generate_cpp("SysCtrl"), second.generate_cpp("SysCtrl"));
        assert_eq!(first.generate_golden(), second.generate_golden());
    }

    #[test]
    fn test_first_register_defines_base_without_alignment() {
        let config = CompilerConfig::with_defaults().base_alignment(1);
        let map = compile(SYS_CTRL, &config).unwrap();
        assert_eq!(map.base_address, 0x5000_1002);
        assert_eq!(map.registers[0].offset, 0);
        assert_eq!(map.max_offset, 0xa2);
        assert_eq!(map.storage_cells(), 0x52);
    }

    #[test]
    fn test_full_width_field() {
        let map = compile_default("R 0x0 ALL RW [15:0] 0xbeef\n").unwrap();
        assert_eq!(map.registers[0].reset_word, 0xbeef);
    }

    #[test]
    fn test_overlap_surfaces_as_range_error() {
        let err = compile_default("R 0x1000 A RW [7:0] 0x1\n  B RW [8:7] 0x0\n").unwrap_err();
        assert!(matches!(err, RegMapError::OverlappingFields { line: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_non_monotonic_addresses() {
        let err = compile_default("A 0x1004 F RW [0:0] 0\nB 0x1002 F RW [0:0] 0\n").unwrap_err();
        assert!(matches!(err, RegMapError::AddressOrder { line: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_errors_name_their_location() {
        let err = compile_default(
            "A 0x1000 F RW [0:0] 0\n\
             B 0x1002 F RW [3:0] 0x1f\n",
        )
        .unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.to_string(),
            "line 2: reset value 0x1f of field `B.F` does not fit in 4 bit(s)"
        );
    }

    #[test]
    fn test_register_cannot_shadow_generated_constant() {
        let err = compile_default("CNT_REG_END 0x1000 A RW [0:0] 1\n").unwrap_err();
        assert!(matches!(
            err,
            RegMapError::ReservedRegisterName { line: 1, .. }
        ));
        assert_eq!(
            err.to_string(),
            "line 1: register name `CNT_REG_END` collides with a generated constant"
        );
    }

    #[test]
    fn test_byte_wide_registers() {
        let config = CompilerConfig::with_defaults().register_byte_width(1);
        let map = compile("A 0x2000 F RW [7:0] 0x5a\nB 0x2001 G RW [3:0] 0x3\n", &config)
            .unwrap();
        assert_eq!(map.max_offset, 1);
        assert_eq!(map.storage_cells(), 2);
        assert!(map
            .generate_cpp("Byte")
            .contains("    reg[B / REG_BYTE_WIDTH] = 0x3;"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CompilerConfig::with_defaults().register_byte_width(0);
        let err = compile(SYS_CTRL, &config).unwrap_err();
        assert_eq!(
            err,
            RegMapError::InvalidConfig(ConfigError::UnsupportedByteWidth(0))
        );
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.line(), None);
    }
}
