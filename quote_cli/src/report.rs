//! Plain-text rendering of quotes and catalogs

use quote_core::calculations::quote::{CostBreakdown, ProcessParameters};
use quote_core::geometry::Geometry;
use quote_core::history::SavedQuote;
use quote_core::materials::{MachineCatalog, MaterialCatalog};

const RULE: &str = "═══════════════════════════════════════";

pub fn print_quote(file_name: &str, geometry: &Geometry, params: &ProcessParameters, material_name: &str, q: &CostBreakdown) {
    println!("{RULE}");
    println!("  QUOTE: {file_name}");
    println!("{RULE}");
    println!();
    println!("Part:");
    println!("  Volume:   {:.2} cm³", geometry.volume);
    println!(
        "  Size:     {:.1} x {:.1} x {:.1} mm",
        geometry.dimensions.length, geometry.dimensions.width, geometry.dimensions.height
    );
    println!("  Wall:     {:.2} mm", geometry.wall_thickness);
    println!("  Source:   {} accuracy", geometry.accuracy);
    println!();
    println!("Process:");
    println!("  Material: {material_name} ({:.1} g/part)", q.part_weight_g);
    println!("  Color:    {}", params.color);
    println!("  Quantity: {}", params.quantity);
    println!("  Cavities: {}", params.cavities);
    println!("  Press:    {}", q.recommended_machine);
    println!("  Cycle:    {:.1} s  ({:.0} parts/h)", q.cycle_time, q.parts_per_hour);
    println!();
    println!("Per part:");
    println!("  Material     {:>12.4}  (incl. color {:.4})", q.material_cost, q.color_premium);
    println!("  Machine      {:>12.4}", q.machine_cost);
    println!("  Mold         {:>12.4}  ({:.2} / {})", q.mold_cost, q.mold_estimate, params.quantity);
    println!("  Scrap        {:>12.4}", q.scrap_cost);
    println!("  ─────────────────────────");
    println!("  Total        {:>12.4}", q.total_per_part);
    println!();
    println!("{RULE}");
    println!("  TOTAL QUOTE: {:.2}", q.total_quote);
    println!("{RULE}");
}

pub fn print_saved(id: &str, saved: &SavedQuote) {
    println!("Saved {} (id {id})", saved.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!();
    print_quote(
        &saved.file_name,
        &saved.geometry,
        &saved.parameters,
        &saved.material_name,
        &saved.breakdown,
    );
}

pub fn print_history_row(id: &str, saved: &SavedQuote) {
    println!(
        "{:<8}  {}  {:<24}  {:<10}  {:>8}  {:>12.2}",
        &id[..8.min(id.len())],
        saved.created_at.format("%Y-%m-%d %H:%M"),
        truncate(&saved.file_name, 24),
        truncate(&saved.material_name, 10),
        saved.parameters.quantity,
        saved.breakdown.total_quote
    );
}

pub fn print_materials(materials: &MaterialCatalog) {
    println!("{:<12}  {:>12}  {:>10}  {:>6}", "Material", "Density", "Price/kg", "Factor");
    for m in materials.iter() {
        println!(
            "{:<12}  {:>7.2} g/cm³  {:>10.2}  {:>6.2}",
            m.name, m.density, m.price_per_kg, m.factor
        );
    }
    println!();
    println!("Unknown materials are quoted as {}.", materials.first().name);
}

pub fn print_machines(machines: &MachineCatalog) {
    println!("{:<10}  {:>10}  {:>14}", "Press", "Rate/h", "Max mold (mm)");
    for t in machines.iter() {
        println!("{:<10}  {:>10.2}  {:>14.0}", t.size_label, t.rate_per_hour, t.max_mold_size);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short.stl", 24), "short.stl");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
