// Shared test helpers: conversions to and from num-bigint (the reference
// implementation in tests), and a deterministic RNG built on SHA-256.

use crate::backend::Uint;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

pub(crate) fn to_big<const N: usize>(x: &Uint<N>) -> BigUint {
    let mut buf = [[0u8; 8]; N];
    x.write_le_bytes(buf.as_flattened_mut()).unwrap();
    BigUint::from_bytes_le(buf.as_flattened())
}

pub(crate) fn from_big<const N: usize>(x: &BigUint) -> Uint<N> {
    Uint::from_le_bytes(&x.to_bytes_le()).unwrap()
}

// Output stream: SHA-256(seed || counter) for counter = 0, 1, 2...
pub(crate) struct ShaStream {
    seed: [u8; 32],
    ctr: u64,
    buf: [u8; 32],
    ptr: usize,
}

pub(crate) fn sha_stream(label: &[u8]) -> ShaStream {
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&Sha256::digest(label));
    ShaStream { seed, ctr: 0, buf: [0u8; 32], ptr: 32 }
}

impl RngCore for ShaStream {

    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for x in dest.iter_mut() {
            if self.ptr == 32 {
                let mut sh = Sha256::new();
                sh.update(&self.seed);
                sh.update(self.ctr.to_le_bytes());
                self.buf.copy_from_slice(&sh.finalize());
                self.ctr += 1;
                self.ptr = 0;
            }
            *x = self.buf[self.ptr];
            self.ptr += 1;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ShaStream {}
