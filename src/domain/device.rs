// ============================================================
// Layer 3 — Backend Device
// ============================================================
// The compute target requested with `-dev`. Accepted spellings:
//
//   cpu      → Device::Cpu
//   cuda     → Device::Cuda(None)      (backend picks the GPU)
//   cuda<N>  → Device::Cuda(Some(N))   (N is a decimal index without leading zeros)
//
// Anything else is a usage error. Parsing is a pure string
// check with no side effects.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::UsageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda(Option<u32>),
}

impl Device {
    /// True for any CUDA target, with or without an explicit index.
    pub fn is_gpu(&self) -> bool {
        matches!(self, Device::Cuda(_))
    }
}

impl FromStr for Device {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UsageError::InvalidDevice { value: s.to_string() };

        if s == "cpu" {
            return Ok(Device::Cpu);
        }
        let suffix = s.strip_prefix("cuda").ok_or_else(invalid)?;
        if suffix.is_empty() {
            return Ok(Device::Cuda(None));
        }
        // u32::from_str also accepts a leading '+', so check the digits first.
        // No leading zeros: the backend must see the index exactly as typed.
        if !suffix.bytes().all(|b| b.is_ascii_digit()) || (suffix.len() > 1 && suffix.starts_with('0')) {
            return Err(invalid());
        }
        let index = suffix.parse::<u32>().map_err(|_| invalid())?;
        Ok(Device::Cuda(Some(index)))
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu            => write!(f, "cpu"),
            Device::Cuda(None)     => write!(f, "cuda"),
            Device::Cuda(Some(i))  => write!(f, "cuda{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_cpu_and_cuda() {
        assert_eq!("cpu".parse::<Device>().unwrap(),  Device::Cpu);
        assert_eq!("cuda".parse::<Device>().unwrap(), Device::Cuda(None));
    }

    #[test]
    fn test_accepts_indexed_cuda() {
        assert_eq!("cuda0".parse::<Device>().unwrap(),  Device::Cuda(Some(0)));
        assert_eq!("cuda12".parse::<Device>().unwrap(), Device::Cuda(Some(12)));
    }

    #[test]
    fn test_rejects_malformed_devices() {
        for bad in ["cudaX", "gpu", "", "CPU", "cuda+1", "cuda-1", " cuda", "cuda1 "] {
            let err = bad.parse::<Device>().unwrap_err();
            assert!(
                matches!(err, UsageError::InvalidDevice { ref value } if value == bad),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_leading_zeros() {
        for bad in ["cuda00", "cuda007", "cuda01"] {
            assert!(bad.parse::<Device>().is_err(), "expected '{bad}' to be rejected");
        }
        assert_eq!("cuda10".parse::<Device>().unwrap(), Device::Cuda(Some(10)));
    }

    #[test]
    fn test_rejects_index_overflow() {
        assert!("cuda99999999999".parse::<Device>().is_err());
    }

    #[test]
    fn test_display_is_canonical_spelling() {
        for s in ["cpu", "cuda", "cuda0", "cuda3", "cuda12"] {
            assert_eq!(s.parse::<Device>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_default_is_cpu() {
        assert_eq!(Device::default(), Device::Cpu);
        assert!(!Device::Cpu.is_gpu());
        assert!(Device::Cuda(Some(1)).is_gpu());
    }
}
