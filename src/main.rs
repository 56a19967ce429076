use anyhow::Result;
use log::info;
use optics::output::{self, Labels};
use optics::settings;
use optics::sweep::Sample;

fn main() -> Result<()> {
    env_logger::init();
    let settings = settings::load_config()?;
    println!("{}", settings);

    let model = settings.model()?;

    if settings.animate {
        let samples = model.sweep(&settings.angle_range)?;
        info!("swept {} incident angles", samples.len());

        println!("Results:");
        for sample in &samples {
            print_sample(sample);
        }

        if let Some(dir) = &settings.output_dir {
            std::fs::create_dir_all(dir)?;
            output::write_samples_txt(&dir.join("sweep.dat"), &samples)?;
            output::write_samples_json(&dir.join("sweep.json"), &samples)?;
            output::write_settings(&dir.join("settings.toml"), &settings)?;
            println!("Results written to {:?}", dir);
        }
    } else {
        if settings.labels {
            let labels = Labels::new(
                &model,
                settings.incident_label(),
                settings.transmitted_label(),
                settings.irradiance,
            );
            println!("{}\n", labels.incident);
            println!("{}\n", labels.transmitted);
        }
        if settings.irradiance {
            println!("{}", model.powers());
        }
        let rays = model.rays();
        println!("Rays:");
        println!("  Incident:         {:?}", rays.incident.end);
        println!("  Reflected:        {:?}", rays.reflected.end);
        println!("  Transmitted:      {:?}", rays.transmitted.end);
    }

    Ok(())
}

fn print_sample(sample: &Sample) {
    match sample.transmitted_angle_deg {
        Some(theta_t) => println!(
            "  {:>6.2} -> {:>6.2}  R = {:.4}  T = {:.4}",
            sample.incident_angle_deg, theta_t, sample.reflectance, sample.transmittance
        ),
        None => println!(
            "  {:>6.2} -> TIR     R = {:.4}  T = {:.4}",
            sample.incident_angle_deg, sample.reflectance, sample.transmittance
        ),
    }
}
