//! Golden-trace recording and comparison.
//!
//! A trace runs every public operation over a fixed edge-case table plus a
//! seeded stream of random bit patterns, folding each result's raw bits into
//! a per-operation digest. Record a trace on one host, ship the compressed
//! file to another build (different OS, CPU, compiler, optimization level)
//! and compare: matching digests mean the math kernels produced identical
//! bits for every sampled input, which is the whole determinism claim.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::hash::Hasher;
use std::io::{BufReader, BufWriter};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::math::SoftF32;
use crate::sweep_log;

pub const TRACE_VERSION: u32 = 1;

/// Bit patterns every sweep always visits: the IEEE special values and
/// category boundaries where implementations disagree first.
const EDGE_PATTERNS: [u32; 24] = [
    0x0000_0000, // +0
    0x8000_0000, // -0
    0x3F80_0000, // 1
    0xBF80_0000, // -1
    0x0000_0001, // smallest subnormal
    0x8000_0001,
    0x007F_FFFF, // largest subnormal
    0x807F_FFFF,
    0x0080_0000, // smallest normal
    0x7F7F_FFFF, // MAX
    0xFF7F_FFFF, // MIN
    0x7F80_0000, // +inf
    0xFF80_0000, // -inf
    0x7FC0_0000, // quiet NaN
    0xFFC0_0000,
    0x7F80_0001, // NaN with payload
    0x4049_0FDB, // pi
    0xC049_0FDB,
    0x3FC9_0FDB, // pi/2
    0x40C9_0FDB, // 2pi
    0x3F00_0000, // 0.5
    0x3E80_0000, // 0.25
    0x4B00_0000, // 2^23
    0x3F80_0001, // 1 + ulp
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OpDigest {
    pub op: String,
    pub digest: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TraceData {
    pub version: u32,
    pub seed: u64,
    pub samples_per_op: u32,
    pub ops: Vec<OpDigest>,
}

#[derive(Debug, Clone)]
pub struct TraceMismatch {
    pub op: String,
    pub ours: u64,
    pub theirs: u64,
}

type UnaryOp = (&'static str, fn(SoftF32) -> SoftF32);
type BinaryOp = (&'static str, fn(SoftF32, SoftF32) -> SoftF32);

const UNARY_OPS: [UnaryOp; 16] = [
    ("neg", |x| -x),
    ("abs", SoftF32::abs),
    ("round", SoftF32::round),
    ("floor", SoftF32::floor),
    ("ceil", SoftF32::ceil),
    ("trunc", SoftF32::trunc),
    ("sqrt", SoftF32::sqrt),
    ("exp", SoftF32::exp),
    ("ln", SoftF32::ln),
    ("log2", SoftF32::log2),
    ("sin", SoftF32::sin),
    ("cos", SoftF32::cos),
    ("tan", SoftF32::tan),
    ("atan", SoftF32::atan),
    ("asin", SoftF32::asin),
    ("acos", SoftF32::acos),
];

const BINARY_OPS: [BinaryOp; 11] = [
    ("add", |a, b| a + b),
    ("sub", |a, b| a - b),
    ("mul", |a, b| a * b),
    ("div", |a, b| a / b),
    ("rem", |a, b| a % b),
    ("ieee_rem", SoftF32::ieee_rem),
    ("pow", SoftF32::pow),
    ("atan2", SoftF32::atan2),
    ("hypot", SoftF32::hypot),
    ("min", SoftF32::min),
    ("max", SoftF32::max),
];

/// Run the full operation sweep and collect one digest per operation.
pub fn record_trace(seed: u64, samples_per_op: u32) -> TraceData {
    let mut ops = Vec::with_capacity(UNARY_OPS.len() + BINARY_OPS.len() + 2);

    for (name, op) in UNARY_OPS {
        let mut hasher = FxHasher::default();
        for bits in EDGE_PATTERNS {
            hasher.write_u32(op(SoftF32::from_bits(bits)).to_bits());
        }
        // every sweep draws from its own seeded stream so op order never
        // changes which inputs an op sees
        let mut rng = StdRng::seed_from_u64(seed);
        for _sample in 0..samples_per_op {
            let x = SoftF32::from_bits(rng.random::<u32>());
            hasher.write_u32(op(x).to_bits());
            sweep_log!(_sample, "[TRACE] {}: {} samples", name, _sample);
        }
        ops.push(OpDigest {
            op: name.to_string(),
            digest: hasher.finish(),
        });
    }

    for (name, op) in BINARY_OPS {
        let mut hasher = FxHasher::default();
        for a in EDGE_PATTERNS {
            for b in EDGE_PATTERNS {
                hasher.write_u32(op(SoftF32::from_bits(a), SoftF32::from_bits(b)).to_bits());
            }
        }
        let mut rng = StdRng::seed_from_u64(seed);
        for _sample in 0..samples_per_op {
            let a = SoftF32::from_bits(rng.random::<u32>());
            let b = SoftF32::from_bits(rng.random::<u32>());
            hasher.write_u32(op(a, b).to_bits());
            sweep_log!(_sample, "[TRACE] {}: {} samples", name, _sample);
        }
        ops.push(OpDigest {
            op: name.to_string(),
            digest: hasher.finish(),
        });
    }

    // integer conversions are part of the deterministic surface too
    let mut hasher = FxHasher::default();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..samples_per_op {
        hasher.write_i32(SoftF32::from_bits(rng.random::<u32>()).to_i32());
    }
    ops.push(OpDigest {
        op: "to_i32".to_string(),
        digest: hasher.finish(),
    });

    let mut hasher = FxHasher::default();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..samples_per_op {
        hasher.write_u32(SoftF32::from_i32(rng.random::<i32>()).to_bits());
    }
    ops.push(OpDigest {
        op: "from_i32".to_string(),
        digest: hasher.finish(),
    });

    TraceData {
        version: TRACE_VERSION,
        seed,
        samples_per_op,
        ops,
    }
}

/// Write a trace as zlib-compressed bincode.
pub fn save_trace(path: &str, trace: &TraceData) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = ZlibEncoder::new(writer, Compression::default());
    bincode::serialize_into(&mut encoder, trace)?;
    encoder.finish()?;
    Ok(())
}

pub fn load_trace(path: &str) -> Result<TraceData, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut decoder = ZlibDecoder::new(reader);
    let trace: TraceData = bincode::deserialize_from(&mut decoder)?;
    if trace.version != TRACE_VERSION {
        return Err(format!(
            "trace version mismatch: file has {}, this build expects {}",
            trace.version, TRACE_VERSION
        )
        .into());
    }
    Ok(trace)
}

/// Compare two traces op by op. An empty result means both recordings saw
/// bit-identical outputs everywhere. Differing configurations are reported
/// as a total mismatch rather than compared digest-by-digest.
pub fn compare_traces(ours: &TraceData, theirs: &TraceData) -> Vec<TraceMismatch> {
    if ours.seed != theirs.seed || ours.samples_per_op != theirs.samples_per_op {
        // digests over different inputs say nothing; flag every op
        return ours
            .ops
            .iter()
            .map(|o| TraceMismatch {
                op: o.op.clone(),
                ours: o.digest,
                theirs: 0,
            })
            .collect();
    }
    let mut mismatches = Vec::new();
    for our_op in &ours.ops {
        match theirs.ops.iter().find(|o| o.op == our_op.op) {
            Some(their_op) if their_op.digest == our_op.digest => {}
            Some(their_op) => mismatches.push(TraceMismatch {
                op: our_op.op.clone(),
                ours: our_op.digest,
                theirs: their_op.digest,
            }),
            None => mismatches.push(TraceMismatch {
                op: our_op.op.clone(),
                ours: our_op.digest,
                theirs: 0,
            }),
        }
    }
    mismatches
}
