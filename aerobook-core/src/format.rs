use crate::flight::Flight;

/// Renders a single flight for display.
///
/// Display formatting is owned by the caller; the engine only needs a way to
/// produce one detail line per leg when assembling search and reservation
/// listings.
pub trait FlightFormatter: Send + Sync {
    fn flight_line(&self, flight: &Flight) -> String;
}

/// The canonical one-line rendering used by the reference client.
pub struct ReferenceFormatter;

impl FlightFormatter for ReferenceFormatter {
    fn flight_line(&self, f: &Flight) -> String {
        format!(
            "ID: {} Day: {} Carrier: {} Number: {} Origin: {} Dest: {} Duration: {} Capacity: {} Price: {}",
            f.fid,
            f.day_of_month,
            f.carrier_id,
            f.flight_num,
            f.origin_city,
            f.dest_city,
            f.actual_time,
            f.capacity,
            f.price
        )
    }
}
