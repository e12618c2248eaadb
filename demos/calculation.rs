use chrono::NaiveDate;

use zmanim_calc::table::{generate_table, render_table};
use zmanim_calc::types::*;
use zmanim_calc::zmanim::{compute_zmanim, format_time};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let location = Location::new("Jerusalem", 31.7683, 35.2137, 754.0, "Asia/Jerusalem")?;
    let date = NaiveDate::from_ymd_opt(2026, 3, 20).ok_or("invalid date")?;
    let conventions = Conventions::default();

    let sheet = compute_zmanim(&ZmanimRequest {
        location: location.clone(),
        date,
        conventions,
    });

    println!("=== Zmanim Calculation Example ===");
    println!(
        "Location: {} ({:.4}°N, {:.4}°E, {:.0} m)",
        location.name(),
        location.latitude(),
        location.longitude(),
        location.elevation()
    );
    println!("Date: {} ({})", date, location.timezone());
    println!("Shaah zmanis: {}", conventions.shaah_zmanis.label());
    println!();
    println!("--- Zmanim ---");
    for (kind, instant) in sheet.iter() {
        println!("{:<30} {}", kind.label(), format_time(instant.as_ref()));
    }
    println!();
    match (sheet.shaah_zmanis, &sheet.degeneracy) {
        (Some(shaah), _) => println!("Shaah zmanis: {} ({:.2} minutes)", shaah, shaah.minutes()),
        (None, Some(err)) => println!("Shaah zmanis: {}", err),
        (None, None) => println!("Shaah zmanis: N/A"),
    }
    if let Some(minutes) = sheet.minutes_between(NamedZman::Alos, NamedZman::Sunrise) {
        println!("Alos to sunrise: {} minutes", minutes);
    }
    println!();
    if let Some(transit) = sheet.transit {
        println!("--- Solar Transit ---");
        println!("Declination: {:.2}°", transit.declination);
        println!("Equation of Time: {:.2} minutes", transit.equation_of_time);
        println!("Altitude: {:.2}°", transit.altitude);
        println!();
    }

    println!("--- Next Seven Days (MGA) ---");
    let table = generate_table(&TableConfig {
        location,
        start: date,
        days: 7,
        conventions: Conventions {
            shaah_zmanis: ShaahZmanisConvention::Mga,
            ..conventions
        },
    })?;
    print!(
        "{}",
        render_table(
            &table,
            &[
                NamedZman::Sunrise,
                NamedZman::SofZmanShma,
                NamedZman::PlagHamincha,
                NamedZman::Sunset,
            ],
        )
    );
    Ok(())
}
