/// Test fixtures: representative payloads from the FIRMS and area APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// FIRMS area CSV shape (MODIS products):
///   latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,
///   instrument,confidence,version,bright_t31,frp,daynight
/// — confidence is a 0-100 number for MODIS (VIIRS products use nominal/low/
///   high strings instead, which is why parsers must tolerate non-numeric
///   confidence cells).
///
/// Area lookup response shape:
///   response.results[] — candidate areas, nearest first; the service uses
///     .zipcode                         — area identifier (string)
///     .major_city                      — optional
///     .median_household_income et al.  — scalar attributes, numeric or null
///     .year_housing_was_built[]        — {label, value} histogram buckets
///     .educational_attainment[]
///     .source_of_earnings[]

/// Five well-formed detections around a Sonoma County fire complex, in feed
/// order with confidences 96, 54, 91, 100, 23. Only three exceed a threshold
/// of 90.
pub(crate) fn fixture_firms_csv() -> &'static str {
    "\
latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
38.5342,-122.6814,330.7,1.1,1.0,2020-09-28,0915,Terra,MODIS,96,6.03,301.2,45.6,D
38.5120,-122.7301,311.4,1.3,1.1,2020-09-28,0915,Terra,MODIS,54,6.03,298.7,12.1,D
38.4987,-122.7013,325.9,1.2,1.1,2020-09-28,0915,Terra,MODIS,91,6.03,300.5,38.2,D
38.5450,-122.6550,342.8,1.0,1.0,2020-09-28,0915,Terra,MODIS,100,6.03,303.9,67.4,D
38.4701,-122.7520,305.2,1.4,1.2,2020-09-28,0915,Terra,MODIS,23,6.03,297.1,8.3,D
"
}

/// Three rows where the middle one carries a VIIRS-style string confidence.
/// Parsers must skip it and keep the other two.
pub(crate) fn fixture_firms_csv_with_bad_row() -> &'static str {
    "\
latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
38.5342,-122.6814,330.7,1.1,1.0,2020-09-28,0915,Terra,MODIS,96,6.03,301.2,45.6,D
38.5120,-122.7301,311.4,1.3,1.1,2020-09-28,0915,Terra,MODIS,nominal,6.03,298.7,12.1,D
38.4987,-122.7013,325.9,1.2,1.1,2020-09-28,0915,Terra,MODIS,91,6.03,300.5,38.2,D
"
}

/// A response with the header row but no detections (quiet day).
pub(crate) fn fixture_firms_csv_header_only() -> &'static str {
    "\
latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
"
}

/// Single complete candidate: every required scalar present and numeric,
/// full histograms (9 house-age buckets, 7 degree buckets, 3 earnings
/// buckets).
pub(crate) fn fixture_area_match_json() -> &'static str {
    r#"{
      "results": [
        {
          "zipcode": "95448",
          "major_city": "Healdsburg",
          "state": "CA",
          "median_household_income": 66287,
          "median_home_value": 584900,
          "population_density": 186.0,
          "housing_units": 5430,
          "occupied_housing_units": 4988,
          "year_housing_was_built": [
            { "label": "1939_or_earlier", "value": 612 },
            { "label": "1940s", "value": 288 },
            { "label": "1950s", "value": 541 },
            { "label": "1960s", "value": 593 },
            { "label": "1970s", "value": 1031 },
            { "label": "1980s", "value": 872 },
            { "label": "1990s", "value": 780 },
            { "label": "2000s", "value": 655 },
            { "label": "2010_or_later", "value": 58 }
          ],
          "educational_attainment": [
            { "label": "no_high_school", "value": 1862 },
            { "label": "high_school", "value": 2326 },
            { "label": "associates", "value": 954 },
            { "label": "bachelors", "value": 1886 },
            { "label": "masters", "value": 704 },
            { "label": "professional", "value": 225 },
            { "label": "doctorate", "value": 102 }
          ],
          "source_of_earnings": [
            { "label": "none", "value": 921 },
            { "label": "part_time", "value": 1534 },
            { "label": "full_time", "value": 2533 }
          ]
        }
      ]
    }"#
}

/// Two candidates; the first (nearest) must be treated as canonical.
pub(crate) fn fixture_area_two_candidates_json() -> &'static str {
    r#"{
      "results": [
        {
          "zipcode": "95448",
          "major_city": "Healdsburg",
          "median_household_income": 66287,
          "median_home_value": 584900,
          "population_density": 186.0,
          "housing_units": 5430
        },
        {
          "zipcode": "95441",
          "major_city": "Geyserville",
          "median_household_income": 60417,
          "median_home_value": 512300,
          "population_density": 24.0,
          "housing_units": 801
        }
      ]
    }"#
}

/// No area within the search radius (open water, unincorporated land).
pub(crate) fn fixture_area_no_match_json() -> &'static str {
    r#"{ "results": [] }"#
}

/// Sparse rural candidate: income is null, home value absent, histograms
/// missing. Parses fine; the validator must reject it.
pub(crate) fn fixture_area_incomplete_json() -> &'static str {
    r#"{
      "results": [
        {
          "zipcode": "89049",
          "major_city": "Tonopah",
          "median_household_income": null,
          "population_density": 1.2,
          "housing_units": 1604
        }
      ]
    }"#
}
