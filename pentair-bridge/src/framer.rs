//! Converts a raw byte stream into validated `Packet`s and back. Two
//! on-wire formats share the physical bus: **A5**, used between the
//! controller, pumps, and remotes; and **IC**, used by the salt
//! chlorine generator. The RX half is a small state machine driven
//! one packet at a time; the TX half builds a frame into a caller's
//! `Buffer`.

use pentair_api::{Address, BusIo, Result};

use crate::buffer::{Buffer, CAPACITY, HEAD_MAX};
use crate::codec;
use crate::packet::{Packet, Variant};

const A5_PREAMBLE: [u8; 3] = [0x00, 0xFF, 0xA5];
const IC_PREAMBLE: [u8; 2] = [0x10, 0x02];
const IC_POSTAMBLE: [u8; 2] = [0x10, 0x03];

/// Transmitted ahead of `A5_PREAMBLE`'s three bytes: a line-idle
/// filler byte the receiver's preamble search just skips over as a
/// mismatch. Not part of the checksum.
const A5_TX_PREAMBLE: [u8; 4] = [0xFF, 0x00, 0xFF, 0xA5];
const IC_TX_PREAMBLE: [u8; 3] = [0xFF, 0x10, 0x02];

const A5_HEADER_LEN: usize = 5; // ver, dst, src, typ, len
const IC_HEADER_LEN: usize = 2; // dst, typ

/// Incrementally matches an incoming byte stream against both
/// preambles at once. A byte that doesn't extend a pattern's current
/// prefix is re-tried against that pattern's first byte, so a stray
/// `10 10 02` still frames the IC preamble even though the first `10`
/// looked like a false start.
#[derive(Default)]
struct PreambleMatcher {
    pos_a5: usize,
    pos_ic: usize,
}

impl PreambleMatcher {
    fn reset(&mut self) {
        self.pos_a5 = 0;
        self.pos_ic = 0;
    }

    /// Feeds one byte; returns the variant detected on a full match.
    fn feed(&mut self, b: u8) -> Option<Variant> {
        self.pos_a5 = Self::advance(&A5_PREAMBLE, self.pos_a5, b);
        self.pos_ic = Self::advance(&IC_PREAMBLE, self.pos_ic, b);

        if self.pos_a5 == A5_PREAMBLE.len() {
            self.reset();
            return Some(Variant::A5Controller);
        }
        if self.pos_ic == IC_PREAMBLE.len() {
            self.reset();
            return Some(Variant::Ic);
        }
        None
    }

    fn advance(pattern: &[u8], pos: usize, b: u8) -> usize {
        if pos < pattern.len() && b == pattern[pos] {
            pos + 1
        } else if pos > 0 && b == pattern[0] {
            1
        } else {
            0
        }
    }
}

/// Drives the receive side of the framer. Owns the scratch `Buffer`
/// that payload bytes land in; a returned `Packet` borrows that
/// buffer for the caller's current receive step only.
pub struct Framer {
    buf: Buffer,
    matcher: PreambleMatcher,
}

impl Framer {
    pub fn new() -> Self {
        Framer { buf: Buffer::alloc(CAPACITY), matcher: PreambleMatcher::default() }
    }

    /// Attempts to receive one complete, checksum-valid packet from
    /// `io`. Returns `Ok(None)` when the byte stream ran out before a
    /// frame completed (timeout, discard, or mid-search); the caller
    /// is expected to call this repeatedly as bytes keep arriving.
    /// Malformed and checksum-failed frames are silently discarded
    /// per the bridge's error-handling policy; only I/O errors
    /// propagate.
    pub async fn receive<IO: BusIo>(&mut self, io: &mut IO) -> Result<Option<Packet<'_>>> {
        let variant = match self.find_preamble(io).await? {
            Some(v) => v,
            None => return Ok(None),
        };

        match self.read_frame(io, variant).await? {
            Some(frame) => {
                self.buf.reset();
                self.buf.reserve(HEAD_MAX);
                self.buf.put(frame.payload.len()).copy_from_slice(&frame.payload);
                Ok(Some(Packet::new(frame.variant, frame.src, frame.dst, frame.typ, self.buf.payload())))
            }
            None => Ok(None),
        }
    }

    async fn read_byte<IO: BusIo>(&self, io: &mut IO) -> Result<Option<u8>> {
        let mut b = [0u8; 1];
        let n = io.read(&mut b).await?;
        Ok((n == 1).then_some(b[0]))
    }

    async fn find_preamble<IO: BusIo>(&mut self, io: &mut IO) -> Result<Option<Variant>> {
        loop {
            let b = match self.read_byte(io).await? {
                Some(b) => b,
                None => return Ok(None),
            };
            if let Some(variant) = self.matcher.feed(b) {
                return Ok(Some(variant));
            }
        }
    }

    async fn read_frame<IO: BusIo>(&mut self, io: &mut IO, variant: Variant) -> Result<Option<DecodedFrame>> {
        // Checksum accumulator, seeded per variant's defined anchor byte.
        let mut sum: u32 = match variant {
            Variant::Ic => IC_PREAMBLE[0] as u32 + IC_PREAMBLE[1] as u32,
            _ => A5_PREAMBLE[2] as u32, // the 0xA5 byte
        };

        let (variant, src, dst, typ, len) = match variant {
            Variant::Ic => {
                let mut hdr = [0u8; IC_HEADER_LEN];
                for slot in hdr.iter_mut() {
                    *slot = match self.read_byte(io).await? {
                        Some(b) => b,
                        None => return Ok(None),
                    };
                }
                sum += hdr[0] as u32 + hdr[1] as u32;

                let dst = Address::new(hdr[0]);
                let typ = hdr[1];
                let len = codec::ic_payload_len(typ).unwrap_or(0);

                (Variant::Ic, Address::new(0), dst, typ, len)
            }
            _ => {
                let mut hdr = [0u8; A5_HEADER_LEN];
                for slot in hdr.iter_mut() {
                    *slot = match self.read_byte(io).await? {
                        Some(b) => b,
                        None => return Ok(None),
                    };
                }
                let (_ver, dst, src, typ, len) = (hdr[0], hdr[1], hdr[2], hdr[3], hdr[4] as usize);

                if len > crate::buffer::PAYLOAD_MAX {
                    return Ok(None);
                }
                sum += hdr.iter().map(|&b| b as u32).sum::<u32>();

                let src = Address::new(src);
                let dst = Address::new(dst);
                let variant = if src.is_pump() || dst.is_pump() { Variant::A5Pump } else { Variant::A5Controller };

                (variant, src, dst, typ, len)
            }
        };

        let mut payload = [0u8; crate::buffer::PAYLOAD_MAX];
        for slot in payload[..len].iter_mut() {
            *slot = match self.read_byte(io).await? {
                Some(b) => b,
                None => return Ok(None),
            };
        }
        sum += payload[..len].iter().map(|&b| b as u32).sum::<u32>();

        let ok = match variant {
            Variant::Ic => {
                let checksum = match self.read_byte(io).await? {
                    Some(b) => b,
                    None => return Ok(None),
                };
                let mut post = [0u8; 2];
                for slot in post.iter_mut() {
                    *slot = match self.read_byte(io).await? {
                        Some(b) => b,
                        None => return Ok(None),
                    };
                }
                post == IC_POSTAMBLE && (sum & 0xFF) as u8 == checksum
            }
            _ => {
                let mut cksum = [0u8; 2];
                for slot in cksum.iter_mut() {
                    *slot = match self.read_byte(io).await? {
                        Some(b) => b,
                        None => return Ok(None),
                    };
                }
                let transmitted = ((cksum[0] as u32) << 8) | cksum[1] as u32;
                (sum & 0xFFFF) == transmitted
            }
        };

        if !ok {
            return Ok(None);
        }

        Ok(Some(DecodedFrame { variant, src, dst, typ, payload: payload[..len].to_vec() }))
    }

    /// The fixed preamble bytes for `variant`, written to the wire
    /// ahead of `out.payload()` by the caller. Not stored in the
    /// `Buffer` itself: the header/payload/trailer built by
    /// `encode_frame` is everything that sits after the preamble.
    pub fn preamble(variant: Variant) -> &'static [u8] {
        match variant {
            Variant::Ic => &IC_TX_PREAMBLE,
            _ => &A5_TX_PREAMBLE,
        }
    }

    /// Builds the header, payload, and trailer for
    /// `(variant, src, dst, typ, payload)` into `out`, which must
    /// provide `HEAD_MAX` bytes of headroom before `payload` and
    /// `TAIL_MAX` bytes after. The preamble itself is not written
    /// here; see `Framer::preamble`.
    pub fn encode_frame(out: &mut Buffer, variant: Variant, src: Address, dst: Address, typ: u8, payload: &[u8]) {
        out.reset();
        out.reserve(crate::buffer::HEAD_MAX);
        out.put(payload.len()).copy_from_slice(payload);

        match variant {
            Variant::Ic => {
                let header = out.push(IC_HEADER_LEN);
                header[0] = dst.raw();
                header[1] = typ;

                let sum: u32 = IC_PREAMBLE[0] as u32
                    + IC_PREAMBLE[1] as u32
                    + dst.raw() as u32
                    + typ as u32
                    + payload.iter().map(|&b| b as u32).sum::<u32>();

                let trailer = out.put(3);
                trailer[0] = (sum & 0xFF) as u8;
                trailer[1] = IC_POSTAMBLE[0];
                trailer[2] = IC_POSTAMBLE[1];
            }
            _ => {
                let header = out.push(A5_HEADER_LEN);
                header[0] = 0x01; // ver
                header[1] = dst.raw();
                header[2] = src.raw();
                header[3] = typ;
                header[4] = payload.len() as u8;

                let sum: u32 = A5_PREAMBLE[2] as u32
                    + header.iter().map(|&b| b as u32).sum::<u32>()
                    + payload.iter().map(|&b| b as u32).sum::<u32>();

                let trailer = out.put(2);
                trailer[0] = ((sum >> 8) & 0xFF) as u8;
                trailer[1] = (sum & 0xFF) as u8;
            }
        }
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

struct DecodedFrame {
    variant: Variant,
    src: Address,
    dst: Address,
    typ: u8,
    payload: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockIo;

    #[tokio::test]
    async fn decodes_a5_state_broadcast_amid_garbage() {
        let mut frame = vec![0xAA, 0x55]; // garbage prefix
        frame.extend_from_slice(&[0xFF, 0x00, 0xFF, 0xA5]);
        frame.extend_from_slice(&[0x01, 0x0F, 0x10, 0x02, 0x1D]);
        let payload = [
            0x09, 0x1F, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x56,
            0x56, 0x02, 0x50, 0x00, 0x50, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        frame.extend_from_slice(&payload);

        let sum: u32 =
            0xA5u32 + [0x01u8, 0x0F, 0x10, 0x02, 0x1D].iter().map(|&b| b as u32).sum::<u32>()
                + payload.iter().map(|&b| b as u32).sum::<u32>();
        frame.push(((sum >> 8) & 0xFF) as u8);
        frame.push((sum & 0xFF) as u8);

        let mut io = MockIo::new(frame);
        let mut framer = Framer::new();

        let pkt = framer.receive(&mut io).await.unwrap().expect("packet decoded");
        assert_eq!(pkt.src, Address::new(0x10));
        assert_eq!(pkt.dst, Address::new(0x0F));
        assert_eq!(pkt.typ, 0x02);
        assert_eq!(pkt.payload.len(), 0x1D);
    }

    #[tokio::test]
    async fn checksum_mismatch_is_discarded() {
        let mut frame = vec![0xFF, 0x00, 0xFF, 0xA5, 0x01, 0x0F, 0x10, 0x02, 0x00];
        frame.push(0x00);
        frame.push(0x00); // wrong checksum
        let mut io = MockIo::new(frame);
        let mut framer = Framer::new();

        assert!(framer.receive(&mut io).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn decodes_ic_chlor_level_resp() {
        // preamble(10,02) + dst(00) + typ(12) + salt_raw(3C) + error(80),
        // checksum = sum of all of the above, low byte = 0xE0.
        let frame = vec![0xFF, 0x10, 0x02, 0x00, 0x12, 0x3C, 0x80, 0xE0, 0x10, 0x03];
        let mut io = MockIo::new(frame);
        let mut framer = Framer::new();

        let pkt = framer.receive(&mut io).await.unwrap().expect("packet decoded");
        assert_eq!(pkt.variant, Variant::Ic);
        assert_eq!(pkt.typ, 0x12);
        assert_eq!(pkt.payload, &[0x3C, 0x80]);
    }

    #[test]
    fn encode_then_framer_decodes_round_trip() {
        let mut buf = Buffer::alloc(CAPACITY);
        let payload = [0x06u8, 0x01];
        Framer::encode_frame(&mut buf, Variant::A5Controller, Address::new(0x21), Address::new(0x10), 0x86, &payload);

        let wire = buf.payload().to_vec();
        // header: ver, dst, src, typ, len
        assert_eq!(&wire[..5], &[0x01, 0x10, 0x21, 0x86, 0x02]);
        assert_eq!(&wire[5..7], &payload);
        assert_eq!(Framer::preamble(Variant::A5Controller), &[0xFF, 0x00, 0xFF, 0xA5]);
    }
}
