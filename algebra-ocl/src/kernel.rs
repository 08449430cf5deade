//! Element-wise field operations over slices, split between the host engine
//! and the per-thread device engine.
//!
//! `KernelWorker` dispatches one `FieldOp` over whole buffers. A share of the
//! elements, set by `PASTA_CPU_UTILIZATION` or `with_cpu_utilization`, runs on
//! the host `Fp256<P>`; the rest is copied into device layout and processed
//! in work groups of `LOCAL_WORK_SIZE` threads, each one running `MontT<P>`
//! on a single element exactly as the matching OpenCL kernel does.

use crate::device::{from_device, to_device, MontT};
use crate::error::{DeviceError, DeviceResult};
use crate::ffgen;
use algebra::fields::{validate, Fp256, Fp256Parameters, MontgomeryBackend};
use crossbeam::thread;
use log::{error, info};
use rayon::prelude::*;
use std::marker::PhantomData;

/// Work items per work group.
pub const LOCAL_WORK_SIZE: usize = 256;

/// Share of the elements to keep on the host, in `[0, 1]`.
pub fn get_cpu_utilization() -> f64 {
    use std::env;

    env::var("PASTA_CPU_UTILIZATION")
        .and_then(|v| match v.parse() {
            Ok(val) => Ok(val),
            Err(_) => {
                error!("Invalid PASTA_CPU_UTILIZATION! Defaulting to 0...");
                Ok(0f64)
            }
        })
        .unwrap_or(0f64)
        .max(0f64)
        .min(1f64)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOp {
    Add,
    Sub,
    Mul,
    Square,
    Negate,
    Invert,
}

impl FieldOp {
    pub fn is_binary(&self) -> bool {
        matches!(self, FieldOp::Add | FieldOp::Sub | FieldOp::Mul)
    }

    /// Kernel name without the field prefix, as emitted by `ffgen`.
    pub fn kernel_name(&self) -> &'static str {
        match self {
            FieldOp::Add => "add_kernel",
            FieldOp::Sub => "sub_kernel",
            FieldOp::Mul => "mul_kernel",
            FieldOp::Square => "sqr_kernel",
            FieldOp::Negate => "neg_kernel",
            FieldOp::Invert => "inv_kernel",
        }
    }

    /// Applies the operation to one element. Unary operations ignore `b`;
    /// binary ones treat a missing `b` as zero.
    #[inline]
    pub fn apply<B: MontgomeryBackend>(&self, a: &B, b: Option<&B>) -> B {
        let zero = B::field_zero();
        let b = b.unwrap_or(&zero);
        match self {
            FieldOp::Add => a.field_add(b),
            FieldOp::Sub => a.field_sub(b),
            FieldOp::Mul => a.field_mul(b),
            FieldOp::Square => a.field_sqr(),
            FieldOp::Negate => a.field_neg(),
            FieldOp::Invert => a.field_inv(),
        }
    }
}

fn apply_all<B: MontgomeryBackend>(op: FieldOp, a: &[B], b: &[B]) -> Vec<B> {
    if op.is_binary() {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| op.apply(x, Some(y)))
            .collect()
    } else {
        a.iter().map(|x| op.apply(x, None)).collect()
    }
}

pub struct KernelWorker<P: Fp256Parameters> {
    source: &'static str,
    cpu_utilization: f64,
    _params: PhantomData<P>,
}

impl<P: Fp256Parameters> KernelWorker<P> {
    /// Checks the parameter table of `P` and loads the program source. The
    /// host share is read once here from `PASTA_CPU_UTILIZATION`.
    pub fn create() -> DeviceResult<KernelWorker<P>> {
        validate::<P>()?;
        let source = ffgen::kernel_source(false);
        let cpu_utilization = get_cpu_utilization();
        info!(
            "Field kernels: work-group size {} (CPU utilization: {})",
            LOCAL_WORK_SIZE, cpu_utilization
        );
        Ok(KernelWorker {
            source,
            cpu_utilization,
            _params: PhantomData,
        })
    }

    /// Overrides the host share, clamped to `[0, 1]`.
    pub fn with_cpu_utilization(mut self, share: f64) -> Self {
        self.cpu_utilization = share.max(0f64).min(1f64);
        self
    }

    pub fn cpu_utilization(&self) -> f64 {
        self.cpu_utilization
    }

    /// The OpenCL program this worker dispatches into.
    pub fn source(&self) -> &'static str {
        self.source
    }

    fn run_device(op: FieldOp, a: &[Fp256<P>], b: &[Fp256<P>]) -> Vec<Fp256<P>> {
        let a: Vec<MontT<P>> = to_device(a);
        let b: Vec<MontT<P>> = to_device(b);
        let out: Vec<MontT<P>> = if op.is_binary() {
            a.par_chunks(LOCAL_WORK_SIZE)
                .zip(b.par_chunks(LOCAL_WORK_SIZE))
                .flat_map_iter(|(a, b)| apply_all(op, a, b))
                .collect()
        } else {
            a.par_chunks(LOCAL_WORK_SIZE)
                .flat_map_iter(|a| apply_all(op, a, &[]))
                .collect()
        };
        from_device(&out)
    }

    /// Applies `op` element-wise. For unary operations `b` must be empty,
    /// for binary ones it must match `a` in length. The output keeps the
    /// input order.
    pub fn run(
        &self,
        op: FieldOp,
        a: &[Fp256<P>],
        b: &[Fp256<P>],
    ) -> DeviceResult<Vec<Fp256<P>>> {
        let expected = if op.is_binary() { a.len() } else { 0 };
        if b.len() != expected {
            return Err(DeviceError::LengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }

        let n = a.len();
        let cpu_n = ((n as f64) * self.cpu_utilization) as usize;
        let (cpu_a, dev_a) = a.split_at(cpu_n);
        let (cpu_b, dev_b) = if op.is_binary() {
            b.split_at(cpu_n)
        } else {
            (b, b)
        };

        match thread::scope(|s| -> DeviceResult<Vec<Fp256<P>>> {
            let dev = if !dev_a.is_empty() {
                Some(s.spawn(move |_| Self::run_device(op, dev_a, dev_b)))
            } else {
                None
            };

            let mut out = apply_all(op, cpu_a, cpu_b);
            if let Some(t) = dev {
                let res = t
                    .join()
                    .map_err(|_| DeviceError::Simple("Device worker panicked"))?;
                out.extend(res);
            }
            Ok(out)
        }) {
            Ok(res) => res,
            Err(_) => Err(DeviceError::Simple("Worker scope panicked")),
        }
    }
}
