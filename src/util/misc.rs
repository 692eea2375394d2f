pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn read_file(file_path: &str) -> Res<String> {
    let path = std::path::Path::new(file_path);
    let data = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", file_path, e))?;
    Ok(data)
}
