// Domain layer: display model and ports (renderer, remote service, config). No HTTP or terminal code here.

pub mod model;
pub mod ports;
