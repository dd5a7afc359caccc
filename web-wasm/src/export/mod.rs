pub mod csv_download;
