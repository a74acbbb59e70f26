//! # Opcode Tests

use clockbus_core::isa::{MicroStep, Opcode};
use rstest::rstest;

#[rstest]
#[case(0, Opcode::Load, "LOAD A")]
#[case(1, Opcode::Store, "STORE A")]
#[case(2, Opcode::Add, "ADD")]
#[case(3, Opcode::Print, "PRINT A")]
#[case(4, Opcode::Halt, "HALT")]
fn test_opcode_encoding(#[case] byte: u8, #[case] opcode: Opcode, #[case] mnemonic: &str) {
    assert_eq!(Opcode::try_from(byte), Ok(opcode));
    assert_eq!(u8::from(opcode), byte);
    assert_eq!(opcode.mnemonic(), mnemonic);
    assert_eq!(opcode.to_string(), mnemonic);
}

#[test]
fn test_unknown_opcodes_do_not_decode() {
    for byte in 5..=u8::MAX {
        assert_eq!(Opcode::try_from(byte), Err(byte));
    }
}

#[test]
fn test_operand_usage() {
    let with_operand: Vec<Opcode> = Opcode::ALL
        .into_iter()
        .filter(|op| op.uses_operand())
        .collect();
    assert_eq!(with_operand, vec![Opcode::Load, Opcode::Store, Opcode::Add]);
}

#[test]
fn test_memory_reads_wait_one_tick_for_data() {
    for opcode in [Opcode::Load, Opcode::Add] {
        let steps = opcode.micro_steps();
        assert_eq!(steps[0], MicroStep::AddressOperand);
        assert_eq!(steps[1], MicroStep::Wait);
    }
}

#[test]
fn test_every_opcode_has_steps() {
    for opcode in Opcode::ALL {
        assert!(!opcode.micro_steps().is_empty(), "{opcode} has no steps");
    }
}
