//! CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF, без финального XOR).

/// Побайтовый вариант без таблицы; каждый code unit маскируется до байта.
pub fn checksum(data: &str) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for c in data.encode_utf16() {
        let mut x = ((crc >> 8) ^ c) & 0xFF;
        x ^= x >> 4;
        crc = (crc << 8) ^ (x << 12) ^ (x << 5) ^ x;
    }
    crc
}

/// Четыре hex-цифры в верхнем регистре.
pub fn crc16(data: &str) -> String {
    format!("{:04X}", checksum(data))
}
