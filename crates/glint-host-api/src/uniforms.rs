/// How often the uniform system re-polls a registered supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformUpdateFrequency {
    Once,
    PerTick,
    PerFrame,
}

pub type IntSupplier = Box<dyn Fn() -> i32 + Send + Sync>;
pub type FloatSupplier = Box<dyn Fn() -> f32 + Send + Sync>;

/// Uniform registration surface.
///
/// Suppliers must be infallible and cheap; the pipeline polls them from the
/// render path at the declared frequency and uploads whatever they return.
pub trait UniformHolder {
    fn uniform_1i(&mut self, freq: UniformUpdateFrequency, name: &str, supplier: IntSupplier);
    fn uniform_1f(&mut self, freq: UniformUpdateFrequency, name: &str, supplier: FloatSupplier);
}
