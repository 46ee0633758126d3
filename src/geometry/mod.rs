pub(crate) mod clip;
pub(crate) mod fit;
