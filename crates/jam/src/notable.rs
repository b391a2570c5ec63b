/// Jams picked out with a badge in the listing and calendar.
pub fn is_notable(event_name: Option<&str>, venue_name: Option<&str>, city: Option<&str>) -> bool {
    let name = event_name.unwrap_or_default().to_lowercase();
    let venue = venue_name.unwrap_or_default().to_lowercase();
    let in_san_francisco = city == Some("San Francisco");

    name.contains("berkeley bluegrass barn")
        || name.contains("graton grass")
        || (in_san_francisco && (name.contains("blondie") || venue.contains("blondie")))
}
