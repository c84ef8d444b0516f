#![deny(trivial_casts)]
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    missing_debug_implementations,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]

//!
//! Pingxel paints pixels onto a public IPv6 canvas.
//!
//! Each pixel is one ICMP echo request: the target coordinates and an RGBA
//! color are encoded into the low 64 bits of an IPv6 address underneath a
//! fixed base prefix, and pinging that address paints the pixel.
//!
//! The library covers the whole pipeline: a pixel [`source`] (a decoded
//! bitmap or a flat fill), placement of the requested rectangle on the
//! canvas ([`area`]), address encoding ([`addr`]) and the [`dispatch`] loop
//! that drives paint operations through a [`net::Transport`].
//!

pub mod addr;
pub mod area;
pub mod canvas;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod net;
pub mod source;
