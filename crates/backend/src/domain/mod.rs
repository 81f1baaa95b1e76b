pub mod a001_trabajador;
pub mod a002_tipo_contrato;
pub mod a003_contrato;
pub mod a004_historial_contrato;
