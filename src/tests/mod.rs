//! ionex lib test modules

mod properties;
