/// Internet checksum (RFC 1071) over `bytes`.
///
/// Successive big-endian 16-bit words are summed; an odd trailing byte is the
/// high byte of a zero-padded word. Carries above bit 15 are folded back until
/// none remain, and the complement of the folded sum is returned.
pub fn checksum(bytes: &[u8]) -> u16 {
    let mut chunks = bytes.chunks_exact(2);
    let mut sum: u32 = chunks
        .by_ref()
        .map(|word| u32::from(u16::from_be_bytes([word[0], word[1]])))
        .fold(0, u32::wrapping_add);
    if let [last] = chunks.remainder() {
        sum = sum.wrapping_add(u32::from(*last) << 8);
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    // The loop above leaves sum <= 0xFFFF.
    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_to_bytes(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    fn insert_checksum(bytes: &mut [u8], offset: usize) {
        bytes[offset] = 0;
        bytes[offset + 1] = 0;
        let sum = checksum(bytes);
        bytes[offset..offset + 2].copy_from_slice(&sum.to_be_bytes());
    }

    #[test]
    fn rfc1071_ipv4_header_vector() {
        let header = words_to_bytes(&[
            0x4500, 0x0073, 0x0000, 0x4000, 0x4011, 0x0000, 0xc0a8, 0x0001, 0xc0a8, 0x00c7,
        ]);
        assert_eq!(0xb861, checksum(&header));
    }

    #[test]
    fn verifies_to_zero_after_insertion() {
        let mut header = words_to_bytes(&[
            0x4500, 0x0073, 0x0000, 0x4000, 0x4011, 0x0000, 0xc0a8, 0x0001, 0xc0a8, 0x00c7,
        ]);
        insert_checksum(&mut header, 10);
        assert_eq!([0xb8_u8, 0x61], header[10..12]);
        assert_eq!(0, checksum(&header));
    }

    #[test]
    fn insert_then_verify_for_assorted_inputs() {
        let inputs: [&[u8]; 5] = [
            &[0, 0],
            &[0xFF, 0xFF, 0, 0],
            &[8, 0, 0, 0, 0x12, 0x34, 0, 1, b'a', b'b', b'c'],
            &[0, 0, 0xAB],
            &[0xDE, 0xAD, 0, 0, 0xBE, 0xEF, 0xCA, 0xFE, 0xFF],
        ];
        for input in inputs {
            let mut bytes = input.to_vec();
            let offset = if bytes.len() > 3 { 2 } else { 0 };
            insert_checksum(&mut bytes, offset);
            assert_eq!(0, checksum(&bytes), "input {input:?}");
        }
    }

    #[test]
    fn odd_length_pads_last_byte_as_high_byte() {
        assert_eq!(checksum(&[0x12, 0x34, 0x56]), checksum(&[0x12, 0x34, 0x56, 0x00]));
        assert_eq!(!0x5600, checksum(&[0x56]));
    }

    #[test]
    fn carries_are_folded() {
        // 0xFFFF + 0x0001 = 0x1_0000, folds to 0x0001.
        assert_eq!(!0x0001, checksum(&[0xFF, 0xFF, 0x00, 0x01]));
        // Many words force more than one carry into the upper half.
        let bytes = vec![0xFF; 1024];
        assert_eq!(0, checksum(&bytes));
    }

    #[test]
    fn empty_input() {
        assert_eq!(0xFFFF, checksum(&[]));
    }
}
