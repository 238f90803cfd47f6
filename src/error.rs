use ark_relations::r1cs::SynthesisError;

#[derive(Debug)]
pub enum Error {
    /// The native Merkle tree has no free leaf slots left.
    TreeFull,
    /// A witness array did not have the length the circuit was built for.
    WitnessLengthMismatch,
    /// A leaf index outside the range of appended leaves.
    LeafOutOfRange,
    /// Constraint synthesis, setup or proving failed.
    Synthesis(SynthesisError),
}

pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::TreeFull => write!(f, "merkle tree is full"),
            Error::WitnessLengthMismatch => {
                write!(f, "witness array length does not match circuit parameters")
            }
            Error::LeafOutOfRange => write!(f, "leaf index out of range"),
            Error::Synthesis(e) => write!(f, "constraint synthesis failed: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SynthesisError> for Error {
    fn from(e: SynthesisError) -> Self {
        Error::Synthesis(e)
    }
}
