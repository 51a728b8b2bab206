use super::ColumnOrdering;
use derive_builder::Builder;

/// Settings for [`SparseQR`](crate::qr::SparseQR)

#[derive(Builder, Debug, Clone)]
pub struct SparseQRSettings {
    /// column ordering applied before factoring
    #[builder(default = "ColumnOrdering::default()")]
    pub ordering: ColumnOrdering,
    /// validate the CSC structure of every input matrix
    #[builder(default = "true")]
    pub check_format: bool,
}

impl Default for SparseQRSettings {
    fn default() -> SparseQRSettings {
        SparseQRSettingsBuilder::default().build().unwrap()
    }
}
