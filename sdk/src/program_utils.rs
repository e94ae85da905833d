//! Contains a single utility function for deserializing from [bincode].

use {bincode::Options, crate::instruction::InstructionError};

/// Maximum over-the-wire size of an instruction payload:
/// 1280 is IPv6 minimum MTU, 40 bytes is the size of the IPv6 header, 8 bytes
/// is the size of the fragment header.
pub const PACKET_DATA_SIZE: usize = 1280 - 40 - 8;

/// Deserialize with a limit based on the maximum amount of data a program can
/// expect to get. This function should be used in place of direct
/// deserialization to help prevent OOM errors.
pub fn limited_deserialize<T>(instruction_data: &[u8]) -> Result<T, InstructionError>
where
    T: serde::de::DeserializeOwned,
{
    bincode::options()
        .with_limit(PACKET_DATA_SIZE as u64)
        .with_fixint_encoding() // As per https://github.com/servo/bincode/issues/333, these two options are needed
        .allow_trailing_bytes() // to retain the behavior of bincode::deserialize with the new `options()` method
        .deserialize(instruction_data)
        .map_err(|_| InstructionError::InvalidInstructionData)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::loader_v4_instruction::LoaderV4Instruction};

    #[test]
    fn test_limited_deserialize_wire_format() {
        // Fixint encoding: u32 enum tag, u32 fields, u64 length prefixes
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[
                0, 0, 0, 0, // Write
                7, 0, 0, 0, // offset
                2, 0, 0, 0, 0, 0, 0, 0, // bytes.len()
                8, 9,
            ])
            .unwrap(),
            LoaderV4Instruction::Write {
                offset: 7,
                bytes: vec![8, 9],
            },
        );
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[1, 0, 0, 0, 100, 0, 0, 0]).unwrap(),
            LoaderV4Instruction::Truncate { new_size: 100 },
        );
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[2, 0, 0, 0]).unwrap(),
            LoaderV4Instruction::Deploy,
        );
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[3, 0, 0, 0]).unwrap(),
            LoaderV4Instruction::Retract,
        );
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[4, 0, 0, 0]).unwrap(),
            LoaderV4Instruction::TransferAuthority,
        );
    }

    #[test]
    fn test_limited_deserialize_rejects_garbage() {
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[5, 0, 0, 0]),
            Err(InstructionError::InvalidInstructionData),
        );
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[]),
            Err(InstructionError::InvalidInstructionData),
        );
        // Length prefix pointing past the payload
        assert_eq!(
            limited_deserialize::<LoaderV4Instruction>(&[
                0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 0, 0, 0, 0, 0, 0,
            ]),
            Err(InstructionError::InvalidInstructionData),
        );
    }
}
