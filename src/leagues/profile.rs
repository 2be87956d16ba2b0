//! Fixed nested player schema
//!
//! Section and field names are part of the published JSON format and must
//! stay stable so existing league files keep merging cleanly.

use crate::leagues::reader::Row;
use serde_json::{json, Value};

fn text(row: &Row, column: &str) -> Value {
    row.get(column)
        .map(|v| Value::String(v.clone()))
        .unwrap_or(Value::Null)
}

fn non_empty<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parses a whole number the lenient way: `"182.0"` is 182, junk is null
pub fn lenient_int(value: Option<&str>) -> Option<i64> {
    let number: f64 = value?.trim().parse().ok()?;
    if number.is_finite() && number.abs() < i64::MAX as f64 {
        Some(number.trunc() as i64)
    } else {
        None
    }
}

fn int(row: &Row, column: &str) -> Value {
    lenient_int(row.get(column).map(String::as_str))
        .map(Value::from)
        .unwrap_or(Value::Null)
}

fn list_of(row: &Row, column: &str) -> Value {
    match non_empty(row, column) {
        Some(v) => json!([v]),
        None => json!([]),
    }
}

/// Normalised key for a player, or None when the row has no name
///
/// `" Lionel Messi "` becomes `lionel_messi`.
pub fn player_key(row: &Row) -> Option<String> {
    let name = row.get("player_name")?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.replace(' ', "_").to_lowercase())
}

/// Builds the profile document for one row
pub fn player_profile(row: &Row, league: &str) -> Value {
    let nickname = non_empty(row, "known_as")
        .map(|v| Value::String(v.to_string()))
        .unwrap_or_else(|| text(row, "short_name"));

    let status = match row.get("player_status").map(String::as_str) {
        Some("Active") => Value::String("Aktif".to_string()),
        _ => text(row, "player_status"),
    };

    let contract = json!({
        "mulai": text(row, "contract_start_date"),
        "berakhir": text(row, "contract_expiry_date"),
    });

    json!({
        "1_identitas_informasi_pribadi": {
            "nama_lengkap": text(row, "player_name"),
            "nama_panggilan": nickname,
            "tanggal_lahir": text(row, "date_of_birth"),
            "usia": int(row, "age"),
            "tempat_lahir": text(row, "place_of_birth"),
            "kewarganegaraan": list_of(row, "citizenship"),
            "tinggi_badan_cm": int(row, "height_in_cm"),
            "berat_badan_kg": int(row, "weight_in_kg"),
            "posisi_utama": text(row, "position_main"),
            "posisi_alternatif": list_of(row, "position_other"),
            "kaki_dominan": text(row, "foot"),
            "status_pemain": text(row, "player_status"),
            "klub_saat_ini": text(row, "current_club_name"),
            "nomor_punggung": int(row, "shirt_number"),
            "tanggal_bergabung": text(row, "joined_date"),
            "durasi_kontrak": contract.clone(),
            "agen": text(row, "player_agent"),
            "media_sosial": {
                "instagram": text(row, "instagram_link"),
                "twitter": text(row, "twitter_link"),
            },
        },
        "2_nilai_pasar": {
            "nilai_terkini_euro": int(row, "market_value_in_eur"),
            "tanggal_update": text(row, "last_market_value_update"),
            "riwayat_nilai_pasar": [],
            "nilai_tertinggi_karier": int(row, "highest_market_value_in_eur"),
        },
        "3_data_klub_kontrak": {
            "klub_saat_ini": text(row, "current_club_name"),
            "liga": league,
            "kontrak": contract,
            "status": status,
            "klausul_rilis": null,
            "gaji_tahunan_euro": null,
        },
        "4_riwayat_transfer": [],
        "5_data_cedera": [],
        "6_statistik_performa": {},
        "7_karier_internasional": {
            "negara": text(row, "citizenship"),
            "level": [],
            "debut_internasional": null,
            "turnamen_besar": [],
        },
        "8_prestasi_penghargaan": {
            "gelar_tim": [],
            "penghargaan_individu": [],
            "jumlah_trofi_total": null,
        },
        "9_statistik_taktikal": {
            "formasi_favorit": null,
            "posisi_utama": text(row, "position_main"),
            "kontribusi_dalam_formasi": null,
        },
        "10_tren_karier": {
            "timeline_klub": [],
            "perpindahan_posisi": [],
            "tren_nilai_pasar": null,
            "tren_performa": null,
        },
    })
}
