//! Static device facts.
//!
//! Everything here is read once. Values the host does not expose are left
//! as `None` for the caller to render as a fallback.

use crate::network::{interfaces_up, SYS_CLASS_NET};
use crate::types::DeviceInfo;
use std::fs;
use std::path::Path;
use sysinfo::{Disks, System};

const DMI_SYS_VENDOR: &str = "/sys/class/dmi/id/sys_vendor";

/// Reads every static device property the host exposes.
pub fn read_device_info() -> DeviceInfo {
    let mut sys = System::new();
    sys.refresh_memory();
    let total_memory = Some(sys.total_memory()).filter(|&b| b > 0);
    let used_memory = total_memory.map(|_| sys.used_memory());

    let (disk_total, disk_available) = match primary_disk() {
        Some((total, available)) => (Some(total), Some(available)),
        None => (None, None),
    };

    DeviceInfo {
        platform: platform(),
        vendor: vendor(),
        pixel_ratio: pixel_ratio(),
        hardware_concurrency: std::thread::available_parallelism()
            .ok()
            .map(|n| n.get()),
        max_touch_points: None,
        timezone: timezone(),
        language: language(),
        online: Some(!interfaces_up(Path::new(SYS_CLASS_NET)).is_empty()),
        total_memory,
        used_memory,
        disk_total,
        disk_available,
    }
}

fn platform() -> Option<String> {
    let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    if os.is_empty() {
        return None;
    }
    Some(format!("{} {}", os, std::env::consts::ARCH))
}

fn vendor() -> Option<String> {
    fs::read_to_string(DMI_SYS_VENDOR)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn pixel_ratio() -> Option<f64> {
    ["GDK_SCALE", "QT_SCALE_FACTOR"]
        .iter()
        .find_map(|var| std::env::var(var).ok().and_then(|v| parse_scale(&v)))
}

/// Parses a desktop scale factor. Zero, negative and non-numeric values are
/// rejected.
pub fn parse_scale(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
}

fn timezone() -> Option<String> {
    if let Some(tz) = std::env::var("TZ").ok().and_then(|v| timezone_from_tz(&v)) {
        return Some(tz);
    }
    if let Some(tz) = fs::read_to_string("/etc/timezone")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        return Some(tz);
    }
    if let Some(tz) = fs::read_link("/etc/localtime")
        .ok()
        .and_then(|target| timezone_from_zoneinfo_path(&target))
    {
        return Some(tz);
    }
    let offset = chrono::Local::now().offset().local_minus_utc();
    Some(format_utc_offset(offset))
}

/// Normalizes a `TZ` value: strips the leading `:` and any zoneinfo prefix.
pub fn timezone_from_tz(value: &str) -> Option<String> {
    let value = value.trim().trim_start_matches(':');
    if value.is_empty() {
        return None;
    }
    timezone_from_zoneinfo_path(Path::new(value)).or_else(|| Some(value.to_string()))
}

fn timezone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let s = path.to_str()?;
    let idx = s.find("zoneinfo/")?;
    let zone = &s[idx + "zoneinfo/".len()..];
    (!zone.is_empty()).then(|| zone.to_string())
}

fn format_utc_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("UTC{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

fn language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .and_then(|v| language_from_locale(&v))
}

/// Converts a POSIX locale (`en_US.UTF-8@euro`) into a language tag
/// (`en-US`). `C` and `POSIX` carry no language.
pub fn language_from_locale(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Total and available bytes of the disk mounted at `/`, or the largest disk.
fn primary_disk() -> Option<(u64, u64)> {
    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.list().iter().max_by_key(|d| d.total_space()))?;
    if root.total_space() == 0 {
        return None;
    }
    Some((root.total_space(), root.available_space()))
}
