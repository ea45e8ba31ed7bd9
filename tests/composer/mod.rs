mod defaults;
mod scenarios;
mod settings_round_trip;
mod source_round_trip;
mod validation;
