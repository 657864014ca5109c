//! The four address spaces a [`super::Slave`] can be configured with, each
//! either a materialized [`crate::register::bank`] or a virtualized
//! [`crate::register::callback`] backing, held behind the shared traits so
//! the per-function handlers never need to know which.

use crate::register::{CoilRead, CoilWrite, RegisterRead, RegisterWrite};

#[derive(Default)]
pub struct Banks<'a> {
    pub(crate) holding: Option<&'a mut dyn RegisterWrite>,
    pub(crate) input: Option<&'a mut dyn RegisterRead>,
    pub(crate) coils: Option<&'a mut dyn CoilWrite>,
    pub(crate) discrete: Option<&'a mut dyn CoilRead>,
}
