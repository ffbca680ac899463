#![allow(non_snake_case)]

mod util;
use util::core_cycles;

use ethsign::secp256k1::{Point, Scalar, PrivateKey};
use ethsign::eth;
use sha2::{Sha256, Digest};

fn bench_mulgen() -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    seed[ 8..16].copy_from_slice(&z.to_le_bytes());
    seed[16..24].copy_from_slice(&z.to_le_bytes());
    seed[24..32].copy_from_slice(&z.to_le_bytes());
    let mut s = Scalar::decode_reduce(&seed);
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            let P = Point::mulgen(&s);
            if P.isneutral() != 0 {
                s += Scalar::ZERO;
            } else {
                s += Scalar::ONE;
            }
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, s.encode()[0])
}

fn bench_mul() -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    seed[ 8..16].copy_from_slice(&z.to_le_bytes());
    seed[16..24].copy_from_slice(&z.to_le_bytes());
    seed[24..32].copy_from_slice(&z.to_le_bytes());
    let mut s = Scalar::decode_reduce(&seed);
    let mut P = Point::mulgen(&s);
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            P *= s;
            if P.isneutral() != 0 {
                s += Scalar::ZERO;
            } else {
                s += Scalar::ONE;
            }
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, s.encode()[0])
}

fn bench_sign() -> (f64, u8) {
    let z = core_cycles();
    let mut sh = Sha256::new();
    sh.update(&z.to_le_bytes());
    let seed = sh.finalize_reset();
    let skey = PrivateKey::from_seed(&seed);
    let mut tt = [0; 100];
    let mut msg = [0u8; 32];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            let sig = skey.sign_hash(&msg, &[]);
            msg[..].copy_from_slice(&sig.encode()[0..32]);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, msg[0])
}

fn bench_verify() -> (f64, u8) {
    let z = core_cycles();
    let mut sh = Sha256::new();
    sh.update(&z.to_le_bytes());
    let seed = sh.finalize_reset();
    let skey = PrivateKey::from_seed(&seed);
    let pkey = skey.to_public_key();
    let mut sigs = Vec::with_capacity(128);
    for i in 0..128 {
        let msg = [i as u8; 32];
        sigs.push(skey.sign_hash(&msg, &[]));
    }
    let mut tt = [0; 100];
    let mut msg = [0u8; 32];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for j in 0..128 {
            let ff = pkey.verify_hash(&sigs[j], &msg);
            msg[3] ^= 3u8.wrapping_sub(ff as u8);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 128.0, msg[0])
}

fn bench_recover() -> (f64, u8) {
    let z = core_cycles();
    let mut sh = Sha256::new();
    sh.update(&z.to_le_bytes());
    let seed = sh.finalize_reset();
    let skey = PrivateKey::from_seed(&seed);
    let msg = eth::keccak256(&seed);
    let sig = skey.sign_hash(&msg, &[]);
    let mut tt = [0; 100];
    let mut x = 0u8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..20 {
            let pk = sig.recover_public_key(&msg).unwrap();
            x ^= pk.encode_compressed()[1];
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 20.0, x)
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_mul();
    bx ^= x;
    println!("secp256k1 point mul:     {:13.2}", v);
    let (v, x) = bench_mulgen();
    bx ^= x;
    println!("secp256k1 point mulgen:  {:13.2}", v);
    let (v, x) = bench_sign();
    bx ^= x;
    println!("ecdsa sign:              {:13.2}", v);
    let (v, x) = bench_verify();
    bx ^= x;
    println!("ecdsa verify:            {:13.2}", v);
    let (v, x) = bench_recover();
    bx ^= x;
    println!("ecdsa recover:           {:13.2}", v);

    println!("{}", bx);
}
