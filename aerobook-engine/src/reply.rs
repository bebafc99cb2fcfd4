//! Caller-visible replies.
//!
//! Every operation outcome, success or failure, maps to a fixed message
//! here; no error kind leaks past this boundary in any other form. The
//! wording is the caller contract and must not drift.

use aerobook_core::format::FlightFormatter;
use aerobook_core::Itinerary;

use crate::error::OpError;
use crate::reservations::ReservationView;

pub fn create_customer(username: &str, result: &Result<(), OpError>) -> String {
    match result {
        Ok(()) => format!("Created user {username}\n"),
        Err(_) => "Failed to create user\n".to_string(),
    }
}

pub fn login(username: &str, result: &Result<(), OpError>) -> String {
    match result {
        Ok(()) => format!("Logged in as {username}\n"),
        Err(OpError::AlreadyLoggedIn) => "User already logged in\n".to_string(),
        Err(_) => "Login failed\n".to_string(),
    }
}

pub fn search(
    result: &Result<Vec<Itinerary>, OpError>,
    formatter: &dyn FlightFormatter,
) -> String {
    let itineraries = match result {
        Ok(list) if list.is_empty() => return "No flights match your selection\n".to_string(),
        Ok(list) => list,
        Err(_) => return "Failed to search\n".to_string(),
    };

    let mut out = String::new();
    for (index, itinerary) in itineraries.iter().enumerate() {
        out.push_str(&format!(
            "Itinerary {index}: {} flight(s), {} minutes\n",
            itinerary.leg_count(),
            itinerary.total_time()
        ));
        for leg in itinerary.legs() {
            out.push_str(&formatter.flight_line(leg));
            out.push('\n');
        }
    }
    out
}

pub fn book(result: &Result<i64, OpError>) -> String {
    match result {
        Ok(rid) => format!("Booked flight(s), reservation ID: {rid}\n"),
        Err(OpError::NotLoggedIn) => "Cannot book reservations, not logged in\n".to_string(),
        Err(OpError::NoSuchItinerary(index)) => format!("No such itinerary {index}\n"),
        Err(OpError::DuplicateDay(_)) => {
            "You cannot book two flights in the same day\n".to_string()
        }
        Err(_) => "Booking failed\n".to_string(),
    }
}

pub fn pay(rid: i64, result: &Result<i64, OpError>) -> String {
    match result {
        Ok(balance) => format!("Paid reservation: {rid} remaining balance: {balance}\n"),
        Err(OpError::NotLoggedIn) => "Cannot pay, not logged in\n".to_string(),
        Err(OpError::UnpaidNotFound { rid, username }) => {
            format!("Cannot find unpaid reservation {rid} under user: {username}\n")
        }
        Err(OpError::InsufficientBalance { balance, cost }) => {
            format!("User has only {balance} in account but itinerary costs {cost}\n")
        }
        Err(_) => format!("Failed to pay for reservation: {rid}\n"),
    }
}

pub fn list_reservations(
    result: &Result<Vec<ReservationView>, OpError>,
    formatter: &dyn FlightFormatter,
) -> String {
    let reservations = match result {
        Ok(list) if list.is_empty() => return "No reservations found\n".to_string(),
        Ok(list) => list,
        Err(OpError::NotLoggedIn) => {
            return "Cannot view reservations, not logged in\n".to_string()
        }
        Err(_) => return "Failed to retrieve reservations\n".to_string(),
    };

    let mut out = String::new();
    for view in reservations {
        out.push_str(&format!("Reservation {} paid: {}:\n", view.rid, view.paid));
        for flight in &view.flights {
            out.push_str(&formatter.flight_line(flight));
            out.push('\n');
        }
    }
    out
}

pub fn cancel(rid: i64, result: &Result<(), OpError>) -> String {
    match result {
        Ok(()) => format!("Canceled reservation {rid}\n"),
        Err(OpError::NotLoggedIn) => "Cannot cancel reservations, not logged in\n".to_string(),
        Err(_) => format!("Failed to cancel reservation {rid}\n"),
    }
}
