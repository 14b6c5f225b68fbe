#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};

    use crate::models::{Airline, Airport, Route, RouteId};
    use crate::services::prediction::*;

    fn departure(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn create_test_airline(iata: &str, otp: f64) -> Airline {
        Airline {
            iata: iata.to_string(),
            icao: format!("{}X", iata),
            name: format!("{} Airways", iata),
            country: "US".to_string(),
            otp_percent: otp,
            avg_delay_minutes: 12.0,
            fleet_size: 100,
        }
    }

    fn create_test_airport(iata: &str, otp: f64) -> Airport {
        Airport {
            iata: iata.to_string(),
            icao: format!("K{}", iata),
            name: format!("{} International", iata),
            city: iata.to_string(),
            country: "US".to_string(),
            otp_percent: otp,
            avg_delay_minutes: 10.0,
            total_flights: 1000,
            ..Default::default()
        }
    }

    fn create_test_route(weather_risk: f64, avg_delay: f64) -> Route {
        Route {
            id: RouteId::new(1),
            origin_iata: "ATL".to_string(),
            dest_iata: "JFK".to_string(),
            airline_iata: "DL".to_string(),
            otp_percent: 80.0,
            avg_delay_minutes: avg_delay,
            weather_risk,
            peak_hour_factor: 1.0,
            reliability_index: 85.0,
            ..Default::default()
        }
    }

    fn bare_input() -> PredictionInput {
        PredictionInput::new("ATL", "JFK", "DL")
    }

    #[test]
    fn test_defaults_without_reference_data() {
        let result = predict_delay(&bare_input(), &ReferenceData::default());

        assert_eq!(result.reliability_score, 66.0);
        assert_eq!(result.predicted_delay_minutes, 14);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.factors.len(), 4);
        assert_eq!(
            result.explanation,
            "Lower reliability predicted (66.0 score). Minor delay of ~14 minutes expected. \
             Favorable factors: airport otp, time of day."
        );
    }

    #[test]
    fn test_default_factor_breakdown() {
        let result = predict_delay(&bare_input(), &ReferenceData::default());
        let names: Vec<&str> = result.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Airline OTP", "Airport OTP", "Weather Risk", "Time of Day"]
        );

        let airline = &result.factors[0];
        assert_eq!(airline.value, 75.0);
        assert_eq!(airline.impact, Impact::Neutral);
        assert_eq!(airline.description, "DL has 75.0% on-time performance");

        let airport = &result.factors[1];
        assert_eq!(airport.impact, Impact::Positive);
        assert_eq!(airport.description, "Combined airport on-time rate: 75.0%");

        let weather = &result.factors[2];
        assert_eq!(weather.value, 20.0);
        assert_eq!(weather.impact, Impact::Neutral);
        assert_eq!(weather.description, "Weather risk factor: 20%");

        let time = &result.factors[3];
        assert_eq!(time.value, 0.0);
        assert_eq!(time.impact, Impact::Positive);
        assert_eq!(time.description, "Off-peak departure time");
    }

    #[test]
    fn test_peak_hour_departure() {
        let input = bare_input().with_departure(departure("2024-03-15T08:00:00Z"));
        let result = predict_delay(&input, &ReferenceData::default());

        assert_eq!(result.reliability_score, 64.5);
        assert_eq!(result.predicted_delay_minutes, 19);

        let time = &result.factors[3];
        assert_eq!(time.impact, Impact::Negative);
        assert_eq!(time.description, "Peak hour departure increases delay risk");
        assert!((time.value - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_turnaround_adds_negative_factor() {
        let input = bare_input().with_turnaround(20.0);
        let result = predict_delay(&input, &ReferenceData::default());

        assert_eq!(result.reliability_score, 63.0);
        assert_eq!(result.predicted_delay_minutes, 17);
        assert_eq!(result.factors.len(), 5);

        let turnaround = &result.factors[4];
        assert_eq!(turnaround.name, "Turnaround");
        assert_eq!(turnaround.value, 20.0);
        assert_eq!(turnaround.impact, Impact::Negative);
        assert_eq!(turnaround.description, "20 min turnaround time");
        assert_eq!(
            result.explanation,
            "Lower reliability predicted (63.0 score). Minor delay of ~17 minutes expected. \
             Risk factors: turnaround. Favorable factors: airport otp, time of day."
        );
    }

    #[test]
    fn test_long_turnaround_is_favorable() {
        let input = bare_input().with_turnaround(120.0);
        let result = predict_delay(&input, &ReferenceData::default());

        assert_eq!(result.reliability_score, 67.0);
        assert_eq!(result.factors[4].impact, Impact::Positive);
    }

    #[test]
    fn test_rich_history_raises_confidence() {
        let airline = create_test_airline("DL", 85.0);
        let origin = create_test_airport("ATL", 80.0);
        let destination = create_test_airport("JFK", 70.0);
        let route = create_test_route(0.1, 25.0);
        let history: Vec<Option<f64>> = vec![
            Some(10.0),
            Some(20.0),
            Some(30.0),
            None,
            Some(40.0),
            Some(12.0),
            Some(18.0),
            Some(22.0),
            Some(50.0),
            Some(22.0),
        ];
        let refs = ReferenceData {
            airline: Some(&airline),
            origin: Some(&origin),
            destination: Some(&destination),
            route: Some(&route),
            history: &history,
        };

        let signals = resolve_signals(&bare_input(), &refs);
        assert!((signals.avg_historical_delay - 22.4).abs() < 1e-9);
        assert_eq!(signals.airport_otp, 75.0);

        let result = predict_delay(&bare_input(), &refs);
        // 0.6 + 0.1 route + 0.15 history + 0.05 airline + 0.1 airports
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.factors[0].description, "DL Airways has 85.0% on-time performance");
        assert_eq!(result.factors[0].impact, Impact::Positive);
        assert_eq!(result.factors[2].impact, Impact::Positive);
    }

    #[test]
    fn test_mid_sized_history_confidence_step() {
        let history = vec![Some(5.0); 6];
        let refs = ReferenceData {
            history: &history,
            ..Default::default()
        };
        assert_eq!(confidence(&refs), 0.7);

        let short = vec![Some(5.0); 4];
        let refs = ReferenceData {
            history: &short,
            ..Default::default()
        };
        assert_eq!(confidence(&refs), 0.6);
    }

    #[test]
    fn test_single_airport_does_not_add_confidence() {
        let origin = create_test_airport("ATL", 80.0);
        let refs = ReferenceData {
            origin: Some(&origin),
            ..Default::default()
        };
        assert_eq!(confidence(&refs), 0.6);
    }

    #[test]
    fn test_route_profile_used_when_history_empty() {
        let route = create_test_route(0.2, 40.0);
        assert_eq!(average_historical_delay(&[], Some(&route)), 40.0);
        assert_eq!(average_historical_delay(&[], None), DEFAULT_HISTORICAL_DELAY);
        assert_eq!(average_historical_delay(&[None, None], Some(&route)), 0.0);
    }

    #[test]
    fn test_time_of_day_bands() {
        let at = |h: u32| {
            let ts = format!("2024-03-15T{:02}:30:00Z", h);
            time_of_day_factor(Some(&departure(&ts)))
        };
        assert_eq!(time_of_day_factor(None), 1.0);
        assert_eq!(at(5), 0.8);
        assert_eq!(at(6), 1.0);
        assert_eq!(at(7), 1.3);
        assert_eq!(at(9), 1.3);
        assert_eq!(at(10), 1.0);
        assert_eq!(at(17), 1.3);
        assert_eq!(at(20), 1.3);
        assert_eq!(at(21), 1.0);
        assert_eq!(at(22), 0.8);
        assert_eq!(at(0), 0.8);
    }

    #[test]
    fn test_time_of_day_uses_supplied_offset() {
        // 08:00 local in New York is 13:00 UTC
        let local = departure("2024-03-15T08:00:00-05:00");
        assert_eq!(time_of_day_factor(Some(&local)), 1.3);
    }

    #[test]
    fn test_turnaround_bands() {
        assert_eq!(turnaround_factor(None), 1.0);
        assert_eq!(turnaround_factor(Some(29.9)), 0.7);
        assert_eq!(turnaround_factor(Some(30.0)), 0.85);
        assert_eq!(turnaround_factor(Some(45.0)), 1.0);
        assert_eq!(turnaround_factor(Some(90.0)), 1.0);
        assert_eq!(turnaround_factor(Some(90.5)), 1.1);
        assert_eq!(turnaround_factor(Some(f64::NAN)), 1.0);
    }

    #[test]
    fn test_night_departure_is_off_peak() {
        let input = bare_input().with_departure(departure("2024-03-15T23:15:00Z"));
        let result = predict_delay(&input, &ReferenceData::default());
        assert_eq!(result.reliability_score, 67.0);
        assert_eq!(result.factors[3].description, "Off-peak departure time");
        assert_eq!(result.factors[3].impact, Impact::Positive);
        assert!((result.factors[3].value + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_clamped_to_upper_bound() {
        let airline = create_test_airline("DL", 100.0);
        let origin = create_test_airport("ATL", 100.0);
        let destination = create_test_airport("JFK", 100.0);
        let route = create_test_route(0.0, 0.0);
        let refs = ReferenceData {
            airline: Some(&airline),
            origin: Some(&origin),
            destination: Some(&destination),
            route: Some(&route),
            history: &[],
        };
        let input = bare_input().with_turnaround(120.0);
        let result = predict_delay(&input, &refs);

        assert_eq!(result.reliability_score, 91.0);
        assert_eq!(result.predicted_delay_minutes, 0);
        assert!(result.explanation.starts_with("High reliability expected (91.0 score)."));
        assert!(result.explanation.contains("On-time arrival is likely."));
    }

    #[test]
    fn test_score_clamped_to_lower_bound() {
        let airline = create_test_airline("XX", 0.0);
        let origin = create_test_airport("AAA", 0.0);
        let destination = create_test_airport("BBB", 0.0);
        let route = create_test_route(1.0, 200.0);
        let history = vec![Some(300.0); 12];
        let refs = ReferenceData {
            airline: Some(&airline),
            origin: Some(&origin),
            destination: Some(&destination),
            route: Some(&route),
            history: &history,
        };
        let input = bare_input()
            .with_departure(departure("2024-03-15T18:00:00Z"))
            .with_turnaround(10.0);
        let result = predict_delay(&input, &refs);

        assert_eq!(result.reliability_score, 0.0);
        assert!(result.predicted_delay_minutes > 30);
        assert!(result
            .explanation
            .contains("Significant delay of ~"));
        assert!(result.explanation.contains("Risk factors: airline otp, airport otp, weather risk, time of day, turnaround."));
        assert!(!result.explanation.contains("Favorable factors"));
    }

    #[test]
    fn test_moderate_reliability_clause() {
        let airline = create_test_airline("DL", 85.0);
        let refs = ReferenceData {
            airline: Some(&airline),
            ..Default::default()
        };
        let result = predict_delay(&bare_input(), &refs);
        // 42.5 + 22.5 - 4 + 10
        assert_eq!(result.reliability_score, 71.0);
        assert!(result
            .explanation
            .starts_with("Moderate reliability expected (71.0 score)."));
    }

    #[test]
    fn test_explain_prediction_without_factors() {
        assert_eq!(
            explain_prediction(85.0, 5, &[]),
            "High reliability expected (85.0 score). On-time arrival is likely."
        );
        assert_eq!(
            explain_prediction(50.0, 45, &[]),
            "Lower reliability predicted (50.0 score). Significant delay of ~45 minutes predicted."
        );
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let input = bare_input()
            .with_departure(departure("2024-03-15T18:45:00+01:00"))
            .with_turnaround(35.0);
        let history = vec![Some(12.0), None, Some(7.5)];
        let refs = ReferenceData {
            history: &history,
            ..Default::default()
        };
        assert_eq!(predict_delay(&input, &refs), predict_delay(&input, &refs));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = predict_delay(&bare_input(), &ReferenceData::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["reliabilityScore"], 66.0);
        assert_eq!(json["predictedDelayMinutes"], 14);
        assert_eq!(json["factors"][0]["impact"], "neutral");
        assert_eq!(json["factors"][1]["impact"], "positive");
    }
}
